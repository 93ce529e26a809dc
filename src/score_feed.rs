use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::config::AppConfig;
use crate::report::build_day_report;
use crate::score_fetch;
use crate::state::{Delta, ProviderCommand};

/// Network provider: one blocking fetch per command. The channel doubles
/// as the queue; a burst of navigation collapses to the newest query.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>, config: AppConfig) {
    thread::spawn(move || {
        while let Ok(mut cmd) = cmd_rx.recv() {
            while let Ok(next) = cmd_rx.try_recv() {
                cmd = next;
            }
            let ProviderCommand::FetchDay { name, date } = cmd;

            match score_fetch::fetch_day(&config.api_url, &name, &date, config.cache_ttl_secs) {
                Ok(response) => {
                    if let Some(error) = response.error.as_deref() {
                        // The endpoint rejected the query; its message is
                        // the whole result.
                        let _ = tx.send(Delta::SetStatus(error.to_string()));
                        continue;
                    }
                    let report = build_day_report(&response, &name, config.utc_offset_hours);
                    let _ = tx.send(Delta::SetReport(report));
                }
                Err(err) => {
                    let _ = tx.send(Delta::SetStatus(format!(
                        "成績更新チュ♡今は見れません ({err:#})"
                    )));
                    let _ = tx.send(Delta::Log(format!("[WARN] Fetch error: {err:#}")));
                }
            }
        }
    });
}
