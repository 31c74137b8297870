use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("arth.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("arth.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("arth.client.request_duration_seconds");

pub(crate) static SESSION_SENDS: Counter = Counter::new("arth.session.sends");
pub(crate) static SESSION_BUSY_DROPS: Counter = Counter::new("arth.session.busy_drops");
pub(crate) static SESSION_REJECTED: Counter = Counter::new("arth.session.rejected");
pub(crate) static SESSION_QUOTA_REFUSALS: Counter = Counter::new("arth.session.quota_refusals");
pub(crate) static SESSION_REPLIES: Counter = Counter::new("arth.session.replies");
pub(crate) static SESSION_FAILURES: Counter = Counter::new("arth.session.failures");
pub(crate) static SESSION_TYPING_DELAY: Moments =
    Moments::new("arth.session.typing_delay_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_SENDS);
    collector.register_counter(&SESSION_BUSY_DROPS);
    collector.register_counter(&SESSION_REJECTED);
    collector.register_counter(&SESSION_QUOTA_REFUSALS);
    collector.register_counter(&SESSION_REPLIES);
    collector.register_counter(&SESSION_FAILURES);
    collector.register_moments(&SESSION_TYPING_DELAY);
}
