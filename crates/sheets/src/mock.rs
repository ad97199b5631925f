use async_trait::async_trait;
use dentbook_core::errors::BookingResult;
use mockall::mock;

use crate::{AppointmentRow, AppointmentSink};

// Mock sink for handler tests
mock! {
    pub Sink {}

    #[async_trait]
    impl AppointmentSink for Sink {
        async fn append(&self, row: AppointmentRow) -> BookingResult<()>;
    }
}
