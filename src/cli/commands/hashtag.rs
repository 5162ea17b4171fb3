use crate::cli::commands::open_store;
use crate::cli::parser::{Commands, HashtagAction};
use crate::config::Config;
use crate::core::helpers::account_hashtags;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;
use std::collections::BTreeMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Hashtag { action } = cmd else {
        return Ok(());
    };
    let store = open_store(cfg)?;

    match action {
        HashtagAction::Link { tag, link } => {
            store.set_hashtag_link(tag, link)?;
            if link.trim().is_empty() {
                success(format!("Link of #{} removed", tag.trim_start_matches('#')));
            } else {
                success(format!("#{} → {}", tag.trim_start_matches('#'), link.trim()));
            }
        }
        HashtagAction::List => {
            // tag -> (accounts using it, link)
            let mut tags: BTreeMap<String, (usize, String)> = BTreeMap::new();
            for account in store.accounts()? {
                for t in account_hashtags(&account) {
                    tags.entry(t).or_default().0 += 1;
                }
            }
            for meta in store.hashtag_meta()? {
                tags.entry(meta.tag).or_default().1 = meta.link;
            }

            if tags.is_empty() {
                info("No hashtags in use.");
                return Ok(());
            }
            let mut table = Table::new(&["Tag", "Accounts", "Link"]);
            for (tag, (count, link)) in tags {
                table.add_row(vec![
                    format!("#{}", tag),
                    count.to_string(),
                    colorize_optional(&link),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
