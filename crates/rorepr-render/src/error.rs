use rorepr_core::RepresentationType;

use crate::model::{HttpMethod, MemberType};

/// Failures surfaced to clients as `Error` representations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    FollowLinks(#[from] rorepr_follow::Error),

    #[error("missing query argument `{0}`")]
    MissingArgument(String),

    #[error("no resource at `{0}`")]
    NoSuchResource(String),

    #[error("no such domain type `{0}`")]
    UnknownDomainType(String),

    #[error("no such object `{0}`")]
    UnknownObject(String),

    #[error("no such service `{0}`")]
    UnknownService(String),

    #[error("{member_type} `{member}` not found on `{owner}`")]
    UnknownMember {
        owner: String,
        member_type: MemberType,
        member: String,
    },

    #[error("action `{action}` has no parameter `{param}`")]
    UnknownParameter { action: String, param: String },

    #[error("{member_type} `{member}` is not visible")]
    NotVisible {
        member_type: MemberType,
        member: String,
    },

    #[error("action `{action}` cannot be invoked: {reason}")]
    Disabled { action: String, reason: String },

    #[error("method {method} is not allowed on `{path}`")]
    MethodNotAllowed { method: HttpMethod, path: String },

    #[error("`{0}` does not accept application/json")]
    NotJson(String),

    #[error("requested profile `{requested}` does not match `{produced}`")]
    NotAcceptable { requested: String, produced: String },

    #[error("no renderer registered for {0}")]
    NoRenderer(RepresentationType),

    #[error("renderer for {expected} cannot render {actual}")]
    SubjectMismatch {
        expected: RepresentationType,
        actual: RepresentationType,
    },

    #[error("invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

impl RenderError {
    /// HTTP status code reported for this failure.
    pub fn status(&self) -> u16 {
        match self {
            Self::FollowLinks(_) | Self::MissingArgument(_) => 400,
            Self::Disabled { .. } => 403,
            Self::NoSuchResource(_)
            | Self::UnknownDomainType(_)
            | Self::UnknownObject(_)
            | Self::UnknownService(_)
            | Self::UnknownMember { .. }
            | Self::UnknownParameter { .. }
            | Self::NotVisible { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::NotJson(_) | Self::NotAcceptable { .. } => 406,
            Self::NoRenderer(_) | Self::SubjectMismatch { .. } | Self::Fixture(_) => 500,
        }
    }

    /// Plain-text detail lines, when the error carries more than its message.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::FollowLinks(err) => Some(err.render_plain()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
