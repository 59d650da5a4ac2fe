use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fetcher::{Fetcher, fetch_as};
use crate::locale::LocalePolicy;
use crate::pokemon::Move;

/// Number of moves sampled from an entity's move list.
pub const MOVE_SAMPLE_SIZE: usize = 3;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MoveDetail {
    pub name: String,
    pub type_name: String,
    /// `None` for non-damaging or variable-power moves.
    pub power: Option<i32>,
    pub effect: String,
}

/// Fetches one move resource and picks its localized display text.
pub async fn resolve_move(
    fetcher: &dyn Fetcher,
    url: &str,
    policy: &LocalePolicy,
) -> Result<MoveDetail> {
    let mv: Move = fetch_as(fetcher, url).await?;

    let detail = MoveDetail {
        name: policy.display_name(&mv),
        type_name: mv.r#type.name.clone(),
        power: mv.power,
        effect: policy.short_effect(&mv),
    };
    tracing::debug!("Resolved move {} as {}", mv.name, detail.name);
    Ok(detail)
}

/// Resolves the first [`MOVE_SAMPLE_SIZE`] moves concurrently.
///
/// All-or-nothing: the first failure drops the outstanding fetches and is
/// returned as is.
pub async fn resolve_sampled_moves(
    fetcher: &dyn Fetcher,
    urls: &[String],
    policy: &LocalePolicy,
) -> Result<Vec<MoveDetail>> {
    let batch = urls
        .iter()
        .take(MOVE_SAMPLE_SIZE)
        .map(|url| resolve_move(fetcher, url, policy));
    try_join_all(batch).await
}
