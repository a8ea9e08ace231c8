use crate::utils::embed;
use tracing::{error, info, warn};

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, super::Data, Error>;

/// Check VPS system load (CPU, memory, disk)
#[poise::command(slash_command, prefix_command)]
pub async fn vpsload(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let data = ctx.data();
    let reply = ctx
        .send(poise::CreateReply::default().embed(embed::loading(&data.theme)))
        .await?;

    let report_embed = match data.collector.system_load().await {
        Ok(report) => {
            for failure in report.failures() {
                warn!("[SYS] {}", failure);
            }
            info!(
                severity = ?report.overall_severity(&data.thresholds),
                "[SYS] vpsload requested by {}",
                ctx.author().name
            );
            embed::system_load(&report, &data.theme, &data.thresholds)
        }
        Err(e) => {
            error!("Error executing vpsload command: {}", e);
            embed::load_failed(&data.theme, &format!("Failed to get system load: {}", e))
        }
    };

    reply
        .edit(ctx, poise::CreateReply::default().embed(report_embed))
        .await?;

    Ok(())
}
