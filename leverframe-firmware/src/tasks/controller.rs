//! Main controller task
//!
//! Services one switch edge per pass and hands the panel over to the setup
//! workflow when Select is pressed on the running screen. Motions and
//! setup sessions block this task for their whole duration; there is
//! nothing else for the executor to run in the meantime.

use defmt::*;
use embassy_futures::yield_now;

use leverframe_core::config::ConfigStore;
use leverframe_core::setup::{SessionReport, SetupWorkflow};
use leverframe_core::sync::{SyncAction, SyncEvent};
use leverframe_core::traits::{Key, Keypad};
use leverframe_hal_rp2040::EmbassyClock;

use crate::board::{Controller, Panel, Storage};

/// Controller task - switch polling and operator setup
#[embassy_executor::task]
pub async fn controller_task(
    mut sync: Controller,
    mut panel: Panel,
    mut store: ConfigStore,
    mut storage: Storage,
) {
    info!(
        "Controller task started ({} boards, {} servos configured)",
        sync.boards().present_count(),
        store.configured_count()
    );

    let clock = EmbassyClock;
    SetupWorkflow::new(&mut panel, &clock, &mut sync, &mut store, &mut storage).show_running();

    loop {
        if panel.read_key(true) == Key::Select {
            info!("Setup session started");
            let report =
                SetupWorkflow::new(&mut panel, &clock, &mut sync, &mut store, &mut storage)
                    .run_session();
            log_report(&report, store.configured_count());
        }

        if let Some(fault) = panel.take_fault() {
            warn!("Display fault: {}", fault);
        }

        if let Some(event) = sync.poll(&store) {
            log_event(&event);
        }

        yield_now().await;
    }
}

fn log_report(report: &SessionReport, configured: usize) {
    info!(
        "Setup session ended, {} servos configured, {} switch edges serviced",
        configured, report.edges
    );
    if let Some(event) = &report.last_event {
        log_event(event);
    }
    if let Some(e) = report.bus_error {
        warn!("Servo bus fault during setup: {}", e);
    }
    if let Some(e) = report.save_error {
        warn!("Configuration not saved: {}", e);
    }
}

fn log_event(event: &SyncEvent) {
    match event.action {
        SyncAction::Moved => debug!(
            "Servo {} moved (switch {})",
            event.servo.linear(),
            event.level
        ),
        SyncAction::Unconfigured => trace!(
            "Switch {} changed to {}, servo not configured",
            event.servo.linear(),
            event.level
        ),
        SyncAction::BusFault(e) => warn!(
            "Servo {} board {}: bus fault during motion: {}",
            event.servo.linear(),
            event.servo.board(),
            e
        ),
    }
}
