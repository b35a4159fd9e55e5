//! # Sessions
//!
//! State owned by one part editor: the current [`PartSpec`], material and
//! last good [`Mesh`], plus the "latest wins" slot used when generation runs
//! off the caller's thread.
//!
//! ## Latest Wins
//!
//! ```text
//! begin() → ticket 1 ─┐
//! begin() → ticket 2 ─┼─ publish(2, mesh) accepted
//!                     └─ publish(1, mesh) discarded (newer ticket exists)
//! ```

use crate::error::GeometryError;
use crate::material::Material;
use crate::mesh::Mesh;
use crate::params::{PartSpec, PartType};
use crate::parts::generate_with_config;
use config::constants::GeneratorConfig;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

// =============================================================================
// LATEST MESH
// =============================================================================

/// Monotonic generation ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number, starting at 1.
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Holds the result of the most recently started generation.
///
/// # Example
///
/// ```rust
/// use part_geometry::session::LatestMesh;
/// use part_geometry::Mesh;
///
/// let latest = LatestMesh::new();
/// let old = latest.begin();
/// let new = latest.begin();
/// assert!(latest.publish(new, Mesh::default()));
/// assert!(!latest.publish(old, Mesh::default()));
/// ```
#[derive(Debug, Default)]
pub struct LatestMesh {
    issued: AtomicU64,
    slot: Mutex<Option<(Ticket, Arc<Mesh>)>>,
}

impl LatestMesh {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a generation that is about to start.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if no newer ticket has been issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores a finished mesh if its ticket is still the newest.
    ///
    /// Returns false (and drops the mesh) if a newer generation has been
    /// started or published in the meantime.
    pub fn publish(&self, ticket: Ticket, mesh: Mesh) -> bool {
        let mut slot = self.slot.lock();
        if !self.is_current(ticket) {
            trace!(ticket = ticket.0, "discarded superseded mesh");
            return false;
        }
        if matches!(&*slot, Some((stored, _)) if *stored >= ticket) {
            return false;
        }
        *slot = Some((ticket, Arc::new(mesh)));
        true
    }

    /// Latest published mesh, if any.
    pub fn latest(&self) -> Option<Arc<Mesh>> {
        self.slot.lock().as_ref().map(|(_, mesh)| Arc::clone(mesh))
    }

    /// Ticket of the latest published mesh.
    pub fn latest_ticket(&self) -> Option<Ticket> {
        self.slot.lock().as_ref().map(|(ticket, _)| *ticket)
    }
}

// =============================================================================
// PART SESSION
// =============================================================================

/// One part being edited.
///
/// Every parameter change regenerates the whole mesh. A failed
/// regeneration leaves both the parameters and the previous mesh as they
/// were.
#[derive(Debug, Clone)]
pub struct PartSession {
    spec: PartSpec,
    material: Material,
    config: GeneratorConfig,
    mesh: Arc<Mesh>,
}

impl PartSession {
    /// Starts a session on the reference defaults for a part family.
    ///
    /// # Example
    ///
    /// ```rust
    /// use part_geometry::session::PartSession;
    /// use part_geometry::PartType;
    ///
    /// let mut session = PartSession::new(PartType::Gear)?;
    /// let before = session.mesh().vertex_count();
    /// session.set_parameter("teeth", 12.0)?;
    /// assert_ne!(session.mesh().vertex_count(), before);
    /// # Ok::<(), part_geometry::GeometryError>(())
    /// ```
    pub fn new(part_type: PartType) -> Result<Self, GeometryError> {
        Self::with_spec(PartSpec::with_defaults(part_type), GeneratorConfig::default())
    }

    /// Starts a session from an explicit spec and configuration.
    pub fn with_spec(spec: PartSpec, config: GeneratorConfig) -> Result<Self, GeometryError> {
        let mesh = generate_with_config(spec.part_type, &spec.parameters, &config)?;
        Ok(Self {
            spec,
            material: Material::default(),
            config,
            mesh: Arc::new(mesh),
        })
    }

    pub fn spec(&self) -> &PartSpec {
        &self.spec
    }

    pub fn part_type(&self) -> PartType {
        self.spec.part_type
    }

    pub fn material(&self) -> Material {
        self.material
    }

    /// Changes the material; geometry is unaffected.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Current mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Shared handle to the current mesh.
    pub fn shared_mesh(&self) -> Arc<Mesh> {
        Arc::clone(&self.mesh)
    }

    /// Sets one parameter and regenerates.
    ///
    /// Returns `Ok(false)` without regenerating if the id is unknown.
    pub fn set_parameter(&mut self, id: &str, value: f64) -> Result<bool, GeometryError> {
        let Some(previous) = self.spec.parameters.value(id) else {
            debug!(id, "ignored unknown parameter");
            return Ok(false);
        };

        self.spec.parameters.set_value(id, value);
        match self.regenerate() {
            Ok(()) => Ok(true),
            Err(err) => {
                self.spec.parameters.set_value(id, previous);
                Err(err)
            }
        }
    }

    /// Switches part family, discarding the current mesh and parameters.
    pub fn set_part_type(&mut self, part_type: PartType) -> Result<(), GeometryError> {
        if part_type == self.spec.part_type {
            return Ok(());
        }
        let spec = PartSpec::with_defaults(part_type);
        let mesh = generate_with_config(spec.part_type, &spec.parameters, &self.config)?;
        debug!(from = %self.spec.part_type, to = %part_type, "switched part type");
        self.spec = spec;
        self.mesh = Arc::new(mesh);
        Ok(())
    }

    /// Rebuilds the mesh from the current spec.
    pub fn regenerate(&mut self) -> Result<(), GeometryError> {
        let mesh = generate_with_config(self.spec.part_type, &self.spec.parameters, &self.config)?;
        self.mesh = Arc::new(mesh);
        Ok(())
    }
}
