//! Nullable host hooks: notifications, external links and payouts are recorded.

use async_trait::async_trait;
use grow_ledger::{GatewayError, PayoutGateway, PayoutRequest};
use grow_types::{LinkOpener, NotificationSink, NotifyLevel};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::lock;

#[derive(Default)]
pub struct NullNotifier {
    sent: Mutex<Vec<(String, NotifyLevel)>>,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, NotifyLevel)> {
        lock(&self.sent).clone()
    }

    pub fn count(&self, level: NotifyLevel) -> usize {
        lock(&self.sent).iter().filter(|(_, l)| *l == level).count()
    }
}

impl NotificationSink for NullNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        lock(&self.sent).push((message.to_string(), level));
    }
}

#[derive(Default)]
pub struct NullLinks {
    opened: Mutex<Vec<String>>,
}

impl NullLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

impl LinkOpener for NullLinks {
    fn open_external(&self, url: &str) {
        lock(&self.opened).push(url.to_string());
    }
}

/// Accepts every payout unless a failure is queued.
#[derive(Default)]
pub struct NullPayoutGateway {
    failures: Mutex<VecDeque<GatewayError>>,
    submitted: Mutex<Vec<PayoutRequest>>,
}

impl NullPayoutGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, error: GatewayError) {
        lock(&self.failures).push_back(error);
    }

    pub fn submitted(&self) -> Vec<PayoutRequest> {
        lock(&self.submitted).clone()
    }
}

#[async_trait]
impl PayoutGateway for NullPayoutGateway {
    async fn submit(&self, request: &PayoutRequest) -> Result<(), GatewayError> {
        if let Some(error) = lock(&self.failures).pop_front() {
            return Err(error);
        }
        lock(&self.submitted).push(request.clone());
        Ok(())
    }
}
