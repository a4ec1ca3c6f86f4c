use std::sync::Arc;

use anyhow::Context;

use innkeeper_app::AppContext;
use innkeeper_core::SystemClock;

fn main() -> anyhow::Result<()> {
    innkeeper_observability::init();

    let data_dir = innkeeper_infra::data_dir_from_env();
    let ctx = AppContext::open(&data_dir, Arc::new(SystemClock))
        .with_context(|| format!("failed to open hotel data in {}", data_dir.display()))?;

    let stats = ctx
        .dashboard
        .snapshot()
        .context("failed to compute dashboard statistics")?;

    tracing::info!(
        "{}: {} rooms ({} available), {} active bookings, {} guests; VAT {} {}, refund policy {}",
        ctx.settings.hotel_name(),
        stats.total_rooms,
        stats.available_rooms,
        stats.active_bookings,
        stats.total_guests,
        ctx.settings.vat_rate(),
        ctx.settings.currency(),
        ctx.settings.refund_policy()
    );

    Ok(())
}
