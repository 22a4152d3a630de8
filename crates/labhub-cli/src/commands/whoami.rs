//! Show who the CLI is acting as.

use serde::Serialize;

use labhub_auth::rbac::{Capabilities, capabilities};
use labhub_core::error::AppError;
use labhub_service::RequestContext;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct Identity {
    id: String,
    role: String,
    #[serde(flatten)]
    capabilities: Capabilities,
}

/// Print the resolved actor and its capabilities.
pub fn execute(ctx: &RequestContext, format: OutputFormat) -> Result<(), AppError> {
    let identity = Identity {
        id: ctx.user_id().to_string(),
        role: ctx
            .actor
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "member".to_string()),
        capabilities: capabilities(Some(&ctx.actor)),
    };
    output::print_item(&identity, format);
    Ok(())
}
