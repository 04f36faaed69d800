use std::path::PathBuf;

use rorepr_core::Colors;
use rorepr_follow::FollowSpecs;
use rorepr_render::model::HttpMethod;
use rorepr_render::{InMemoryStore, RenderError, RendererRegistry, Request, Resources, Response};
use tracing::debug;

pub struct RenderArgs {
    pub fixture: PathBuf,
    pub target: String,
    pub method: HttpMethod,
    pub follow_links: Option<String>,
    pub accept: Option<String>,
    pub base_uri: String,
    pub compact: bool,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderCommandError {
    #[error("cannot read fixture `{}`: {source}", .path.display())]
    ReadFixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fixture `{}`: {source}", .path.display())]
    LoadFixture {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error(transparent)]
    FollowLinks(#[from] rorepr_follow::Error),
}

pub fn run(args: RenderArgs) {
    let response = match render(&args) {
        Ok(response) => response,
        Err(RenderCommandError::FollowLinks(e)) => {
            eprint!("{}", e.render(args.color));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        response.body.format(!args.compact, Colors::new(args.color))
    );

    if !response.is_success() {
        let message = response.body.get_str("message").unwrap_or_default();
        eprintln!("error: {} {}", response.status, message);
        std::process::exit(1);
    }
}

/// Loads the fixture and dispatches one request against it.
///
/// A malformed `--follow-links` is rejected up front so its diagnostics can be
/// shown with a source snippet instead of as a 400 body.
pub fn render(args: &RenderArgs) -> Result<Response, RenderCommandError> {
    if let Some(expr) = &args.follow_links {
        FollowSpecs::parse(Some(expr))?;
    }

    let json = std::fs::read_to_string(&args.fixture).map_err(|source| {
        RenderCommandError::ReadFixture {
            path: args.fixture.clone(),
            source,
        }
    })?;
    let store =
        InMemoryStore::from_json(&json).map_err(|source| RenderCommandError::LoadFixture {
            path: args.fixture.clone(),
            source,
        })?;
    let registry = RendererRegistry::with_defaults();

    let mut request = Request::new(args.method, &args.target);
    if let Some(expr) = &args.follow_links {
        request = request.with_follow_links(expr);
    }
    if let Some(accept) = &args.accept {
        request = request.with_accept(accept.as_str());
    }
    debug!(method = %request.method, path = %request.path, "dispatching");

    Ok(Resources::new(&store, &registry, args.base_uri.as_str()).handle(&request))
}
