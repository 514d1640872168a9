//! Regeneration lifecycle with undo.

use std::fmt;
use std::sync::Arc;

use super::heightfield::HeightfieldSynthesizer;
use super::history::ParameterHistory;
use super::mesh::Mesh;
use super::normals::NormalEstimator;
use crate::error::TerrainError;
use crate::params::TerrainParameters;

/// Stage of a regeneration, reported in debug logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Synthesizing,
    EstimatingNormals,
    Published,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Synthesizing => "synthesizing",
            Self::EstimatingNormals => "estimating normals",
            Self::Published => "published",
        };
        f.write_str(name)
    }
}

/// Owns the current parameters, the published mesh and the undo history.
///
/// A failed regeneration leaves all three untouched.
pub struct TerrainSession {
    synthesizer: HeightfieldSynthesizer,
    current: TerrainParameters,
    mesh: Arc<Mesh>,
    history: ParameterHistory,
    phase: Phase,
    /// Phases entered by the most recent request, in order
    trail: Vec<Phase>,
}

impl TerrainSession {
    /// Create a session and publish the initial mesh
    pub fn new(seed: u32, initial: TerrainParameters) -> Result<Self, TerrainError> {
        let synthesizer = HeightfieldSynthesizer::new(seed);
        let mesh = synthesizer.synthesize(&initial)?;
        Ok(Self {
            synthesizer,
            current: initial,
            mesh: Arc::new(mesh),
            history: ParameterHistory::new(),
            phase: Phase::Idle,
            trail: Vec::new(),
        })
    }

    pub fn parameters(&self) -> &TerrainParameters {
        &self.current
    }

    /// The published mesh; holders keep it alive across later regenerations
    pub fn mesh(&self) -> Arc<Mesh> {
        Arc::clone(&self.mesh)
    }

    pub fn history(&self) -> &ParameterHistory {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Phases the last regeneration or undo passed through, ending in `Idle`
    pub fn last_transitions(&self) -> &[Phase] {
        &self.trail
    }

    /// Regenerate with `next`, recording the current parameters for undo.
    pub fn synthesize_terrain(&mut self, next: TerrainParameters) -> Result<Arc<Mesh>, TerrainError> {
        self.trail.clear();
        self.transition(Phase::Validating);
        if let Err(err) = next.validate() {
            log::debug!("rejected parameters: {}", err);
            self.transition(Phase::Idle);
            return Err(err);
        }

        self.history.push(self.current);
        let published = self.publish(next);
        if published.is_err() {
            self.history.pop();
        }
        published
    }

    /// Revert to the most recent snapshot and regenerate from it.
    ///
    /// Returns `Ok(None)` when there is nothing to revert.
    pub fn undo_last_change(&mut self) -> Result<Option<TerrainParameters>, TerrainError> {
        let Some(previous) = self.history.pop() else {
            log::info!("nothing to revert");
            return Ok(None);
        };

        self.trail.clear();
        self.transition(Phase::Validating);
        if let Err(err) = previous.validate() {
            self.history.push(previous);
            self.transition(Phase::Idle);
            return Err(err);
        }

        self.publish(previous)?;
        Ok(Some(previous))
    }

    fn publish(&mut self, params: TerrainParameters) -> Result<Arc<Mesh>, TerrainError> {
        self.transition(Phase::Synthesizing);
        let mut mesh = match self.synthesizer.triangulate(&params) {
            Ok(mesh) => mesh,
            Err(err) => {
                self.transition(Phase::Idle);
                return Err(err);
            }
        };

        self.transition(Phase::EstimatingNormals);
        NormalEstimator::apply(&mut mesh);
        let mesh = Arc::new(mesh);

        self.current = params;
        self.mesh = Arc::clone(&mesh);
        self.transition(Phase::Published);
        log::info!(
            "published {} vertices, {} triangles ({})",
            mesh.vertices.len(),
            mesh.triangle_count(),
            params
        );
        self.transition(Phase::Idle);
        Ok(mesh)
    }

    fn transition(&mut self, phase: Phase) {
        log::debug!("regeneration: {} -> {}", self.phase, phase);
        self.phase = phase;
        self.trail.push(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(octaves: u32) -> TerrainParameters {
        TerrainParameters {
            width: 8,
            height: 8,
            octaves,
            ..Default::default()
        }
    }

    #[test]
    fn test_undo_round_trip() {
        let p = small(2);
        let q = small(5);
        let mut session = TerrainSession::new(7, p).unwrap();
        let original = session.mesh();

        session.synthesize_terrain(q).unwrap();
        assert_eq!(session.parameters(), &q);
        assert_eq!(session.history().len(), 1);

        assert_eq!(session.undo_last_change().unwrap(), Some(p));
        assert_eq!(session.parameters(), &p);
        assert_eq!(session.mesh().vertices, original.vertices);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut session = TerrainSession::new(7, small(1)).unwrap();
        let before = session.mesh();
        assert_eq!(session.undo_last_change().unwrap(), None);
        assert!(Arc::ptr_eq(&before, &session.mesh()));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_rejection_keeps_published_state() {
        let mut session = TerrainSession::new(7, small(3)).unwrap();
        let before = session.mesh();

        for bad in [
            TerrainParameters { width: 1, ..small(3) },
            small(0),
        ] {
            let err = session.synthesize_terrain(bad).unwrap_err();
            assert!(matches!(err, TerrainError::InvalidParameter { .. }));
        }

        assert!(Arc::ptr_eq(&before, &session.mesh()));
        assert_eq!(session.parameters(), &small(3));
        assert!(session.history().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_old_mesh_survives_regeneration() {
        let mut session = TerrainSession::new(3, small(2)).unwrap();
        let held = session.mesh();
        let fresh = session.synthesize_terrain(small(4)).unwrap();
        assert!(!Arc::ptr_eq(&held, &fresh));
        assert_eq!(held.vertices.len(), 64);
    }

    #[test]
    fn test_regeneration_walks_every_phase() {
        let mut session = TerrainSession::new(5, small(2)).unwrap();
        assert!(session.last_transitions().is_empty());

        session.synthesize_terrain(small(3)).unwrap();
        assert_eq!(
            session.last_transitions(),
            &[
                Phase::Validating,
                Phase::Synthesizing,
                Phase::EstimatingNormals,
                Phase::Published,
                Phase::Idle,
            ]
        );
        assert!(session.mesh().vertices.iter().any(|v| v.normal != [0.0, 1.0, 0.0]));

        session.synthesize_terrain(small(0)).unwrap_err();
        assert_eq!(session.last_transitions(), &[Phase::Validating, Phase::Idle]);

        session.undo_last_change().unwrap();
        assert_eq!(session.last_transitions()[2], Phase::EstimatingNormals);
    }

    #[test]
    fn test_multiple_undos_walk_back() {
        let mut session = TerrainSession::new(1, small(1)).unwrap();
        session.synthesize_terrain(small(2)).unwrap();
        session.synthesize_terrain(small(3)).unwrap();

        assert_eq!(session.undo_last_change().unwrap(), Some(small(2)));
        assert_eq!(session.undo_last_change().unwrap(), Some(small(1)));
        assert_eq!(session.undo_last_change().unwrap(), None);
        assert_eq!(session.parameters(), &small(1));
    }
}
