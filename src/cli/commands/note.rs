use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notes::NoteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Note { id, text, list } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        if *list || text.is_empty() {
            let notes = NoteLogic::list(&pool, *id)?;
            if notes.is_empty() {
                info(format!("No notes for student {id}."));
                return Ok(());
            }

            println!("📝 Notes for student {id}:\n");
            for n in notes {
                let when = chrono::DateTime::parse_from_rfc3339(&n.created_at)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or(n.created_at);
                println!("  [{when}] {}", n.text);
            }
        } else {
            NoteLogic::add(&mut pool, *id, &text.join(" "))?;
            success(format!("Note added to student {id}."));
        }
    }

    Ok(())
}
