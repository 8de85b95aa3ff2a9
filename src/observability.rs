use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("sadhak.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("sadhak.client.request_errors");
pub(crate) static CLIENT_TIMEOUTS: Counter = Counter::new("sadhak.client.timeouts");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("sadhak.client.request_duration_seconds");

pub(crate) static SESSION_SENDS: Counter = Counter::new("sadhak.session.sends");
pub(crate) static SESSION_VALIDATION_REJECTS: Counter =
    Counter::new("sadhak.session.validation_rejects");
pub(crate) static SESSION_RECOVERED_ERRORS: Counter =
    Counter::new("sadhak.session.recovered_errors");
pub(crate) static SESSION_TURNS_APPENDED: Counter = Counter::new("sadhak.session.turns_appended");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_TIMEOUTS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_SENDS);
    collector.register_counter(&SESSION_VALIDATION_REJECTS);
    collector.register_counter(&SESSION_RECOVERED_ERRORS);
    collector.register_counter(&SESSION_TURNS_APPENDED);
}
