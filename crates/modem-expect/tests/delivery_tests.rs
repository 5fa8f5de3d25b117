//! Delivery-outcome tracker tests, including a full send round trip.

use std::time::Duration;

use modem_expect::{
    DeliveryOutcomeTracker, DeliveryResult, MockModem, PollConfig, send_text_message,
};

#[tokio::test(start_paused = true)]
async fn acknowledgements_split_across_ticks_still_deliver() {
    let mut modem = MockModem::new();
    let writer = modem.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        writer.queue_output_str("O");
        tokio::time::sleep(Duration::from_millis(100)).await;
        writer.queue_output_str("K\r\nO");
        tokio::time::sleep(Duration::from_millis(100)).await;
        writer.queue_output_str("K\r\n");
    });

    let tracker = DeliveryOutcomeTracker::new();
    let config = PollConfig::new(10, Duration::from_millis(100));
    let result = tracker.wait_delivered_with(&mut modem, config).await;
    assert_eq!(result, DeliveryResult::Delivered);
}

#[tokio::test(start_paused = true)]
async fn late_error_still_fails_the_send() {
    let mut modem = MockModem::new();
    let writer = modem.clone();
    tokio::spawn(async move {
        writer.queue_output_str("\r\nOK\r\n");
        tokio::time::sleep(Duration::from_millis(150)).await;
        writer.queue_output_str("+CMS ERROR: 331\r\n");
    });

    let tracker = DeliveryOutcomeTracker::new();
    let config = PollConfig::new(10, Duration::from_millis(100));
    let result = tracker.wait_delivered_with(&mut modem, config).await;
    assert_eq!(result, DeliveryResult::NotDelivered);
}

#[tokio::test(start_paused = true)]
async fn send_then_wait_round_trip() {
    let mut modem = MockModem::new();
    send_text_message(&mut modem, "tank reading 17", "+15550001111").await;

    // The command side reached the modem in order.
    let written = modem.take_input_str();
    assert!(written.starts_with("AT+CMGF=1\r"));
    assert!(written.contains("AT+CMGS=\"+15550001111\""));
    assert!(written.contains("tank reading 17"));

    // The modem acknowledges command-mode entry and the final send.
    modem.queue_output_str("\r\nOK\r\n+CMGS: 7\r\n\r\nOK\r\n");
    let tracker = DeliveryOutcomeTracker::new();
    let result = tracker.wait_delivered(&mut modem).await;
    assert_eq!(result, DeliveryResult::Delivered);
}

#[tokio::test]
async fn own_command_echo_is_plain_chatter() {
    // The command echo plus the single command-mode acknowledgement must
    // not count as delivery on their own.
    let mut modem = MockModem::new();
    modem.queue_output_str("AT+CMGF=1\r\r\nOK\r\n");

    let tracker = DeliveryOutcomeTracker::new();
    let config = PollConfig::new(1, Duration::from_millis(100));
    let result = tracker.wait_delivered_with(&mut modem, config).await;
    assert_eq!(result, DeliveryResult::NotDelivered);
}
