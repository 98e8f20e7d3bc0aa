use crate::model::{EdgeId, VertexId};
use thiserror::Error;

/// Reasons a mutation was refused. A refused mutation leaves the polygon untouched.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EditError {
    #[error("unknown vertex id {0}")]
    UnknownVertex(VertexId),
    #[error("unknown edge id {0}")]
    UnknownEdge(EdgeId),
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("edge {0} is not a straight line")]
    NotLine(EdgeId),
    #[error("edge {0} is not a Bezier curve")]
    NotBezier(EdgeId),
    #[error("fixed length must be a finite non-negative number, got {0}")]
    InvalidLength(f64),
    #[error("cannot set vertical constraint: adjacent edge is already vertical")]
    AdjacentVertical,
    #[error("continuity needs a Bezier or arc edge next to the vertex")]
    LineOnlyVertex,
    #[error("C1 continuity is not supported next to an arc")]
    C1WithArc,
    #[error("the other end of the adjacent arc already requests G1")]
    ArcG1Conflict,
    #[error("a polygon needs at least {min} vertices, it has {count}")]
    TooFewVertices { count: usize, min: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EditError {
    /// Stable machine-readable code for UI layers.
    pub fn code(&self) -> &'static str {
        match self {
            EditError::UnknownVertex(_) | EditError::UnknownEdge(_) => "invalid_id",
            EditError::NonFinite(_) => "non_finite",
            EditError::NotLine(_) => "not_line",
            EditError::NotBezier(_) => "not_bezier",
            EditError::InvalidLength(_) => "invalid_length",
            EditError::AdjacentVertical => "adjacent_vertical",
            EditError::LineOnlyVertex => "line_only_vertex",
            EditError::C1WithArc => "c1_with_arc",
            EditError::ArcG1Conflict => "arc_g1_conflict",
            EditError::TooFewVertices { .. } => "too_few_vertices",
            EditError::InvalidConfig(_) => "invalid_config",
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;
