//! get_resources command

use tracing::error;

use crate::common::{CommandReply, Invocation};
use crate::domains::catalog::data::label_for;
use crate::domains::catalog::{CatalogResult, CatalogStore};
use crate::kernel::{audit_log, BotDeps};

/// List one category, or every non-empty category when `category` is `None`.
pub async fn get_resources(
    category: Option<&str>,
    invocation: &Invocation,
    deps: &BotDeps,
) -> CommandReply {
    let result = match category {
        Some(name) => category_listing(&deps.catalog, name).await,
        None => full_listing(&deps.catalog).await,
    };

    match result {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, category = ?category, "Failed to list resources");
            audit_log(
                deps.audit.as_ref(),
                &format!("{} Database error.", invocation.describe()),
            )
            .await;
            CommandReply::error("Error. Please contact administrator.")
        }
    }
}

async fn category_listing(store: &CatalogStore, name: &str) -> CatalogResult<CommandReply> {
    let label = label_for(name);
    let mut urls = store.list_resources_by_category(name).await?;

    if urls.is_empty() {
        return Ok(CommandReply::warning(format!(
            "🇬🇧 No resources found in {label}.\n🇫🇷 Aucune ressource trouvée dans {label}."
        )));
    }

    dedup_keep_order(&mut urls);
    Ok(CommandReply::listing([(heading(label), urls)]))
}

async fn full_listing(store: &CatalogStore) -> CatalogResult<CommandReply> {
    let grouped = store.list_all_resources().await?;

    if grouped.is_empty() {
        return Ok(CommandReply::warning(
            "🇬🇧 No resources found.\n🇫🇷 Aucune ressource trouvée.",
        ));
    }

    let mut sections: Vec<(String, Vec<String>)> = Vec::with_capacity(grouped.len());
    for (category_id, urls) in grouped {
        let name = store
            .resolve_category_name(category_id)
            .await?
            .unwrap_or_else(|| category_id.to_string());
        sections.push((heading(label_for(&name)), urls.into_iter().collect()));
    }

    Ok(CommandReply::listing(sections))
}

fn heading(label: &str) -> String {
    format!("**{}**", label)
}

fn dedup_keep_order(urls: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    urls.retain(|url| seen.insert(url.clone()));
}
