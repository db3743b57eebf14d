//! add_resource command

use tracing::{error, info};

use crate::common::{CommandReply, Invocation};
use crate::domains::catalog::data::label_for;
use crate::domains::catalog::CatalogError;
use crate::kernel::{audit_log, BotDeps};

/// Index a link and build the reply.
///
/// Input problems are answered verbatim. A store failure gets a generic reply
/// and the detail goes to the log and the audit sink.
pub async fn add_resource(
    url: &str,
    category: &str,
    invocation: &Invocation,
    deps: &BotDeps,
) -> CommandReply {
    match deps.catalog.add_resource(url, category).await {
        Ok(resource_id) => {
            info!(resource_id = %resource_id, user = %invocation.user_name, "Link indexed");
            CommandReply::success(format!("Link added to {} category.", label_for(category)))
        }
        Err(e @ CatalogError::InvalidInput { .. }) => {
            audit_log(
                deps.audit.as_ref(),
                &format!("{} Wrong URL: '{}'", invocation.describe(), url),
            )
            .await;
            CommandReply::error(e.to_string())
        }
        Err(e) if e.is_user_error() => CommandReply::error(e.to_string()),
        Err(e) => {
            error!(error = %e, url = %url, category = %category, "Failed to add resource");
            audit_log(
                deps.audit.as_ref(),
                &format!("{} Database error.", invocation.describe()),
            )
            .await;
            CommandReply::error("Error. Please contact administrator.")
        }
    }
}
