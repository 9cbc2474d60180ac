mod event_handlers_test;
