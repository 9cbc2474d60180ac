pub mod dynamo_test_utils;
pub mod http_test_utils;
pub mod mock_event_store;
pub mod mock_invitation_store;
pub mod recording_notifier;
pub mod test_logging;
