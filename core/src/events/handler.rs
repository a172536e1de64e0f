use super::DashboardSignal;

/// Observer for signals processed by the carrier screen.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &DashboardSignal);
}
