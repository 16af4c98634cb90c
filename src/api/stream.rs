use std::io::{BufRead, BufReader};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

/// A server push signal. Carries no payload: any message on the stream
/// means "something changed, re-fetch now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSignal;

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Listener on the server's one-way event stream.
///
/// A background thread holds a long-lived GET of `/api/events/stream` and
/// forwards a unit signal per SSE message. Transport errors are swallowed
/// and the connection is re-established after a short delay, with no action
/// required from the rest of the system. The thread exits once the receiver
/// side is dropped.
pub struct UpdateStream {
    rx: mpsc::Receiver<UpdateSignal>,
}

impl UpdateStream {
    /// Start listening against the given server base URL.
    pub fn start(base_url: &str) -> Result<UpdateStream, reqwest::Error> {
        let (tx, rx) = mpsc::channel();
        let url = format!("{}/api/events/stream", base_url.trim_end_matches('/'));

        // the stream is held open indefinitely, so no request timeout
        let client = Client::builder().timeout(None).build()?;

        thread::spawn(move || {
            let mut reconnecting = false;
            loop {
                if let Ok(resp) = client.get(&url).send()
                    && resp.status().is_success()
                {
                    // catch up on anything missed while disconnected
                    if reconnecting && tx.send(UpdateSignal).is_err() {
                        return;
                    }
                    let reader = BufReader::new(resp);
                    for line in reader.lines() {
                        let Ok(line) = line else { break };
                        if is_message_line(&line) && tx.send(UpdateSignal).is_err() {
                            return; // receiver gone, stop listening
                        }
                    }
                }
                // connection lost or refused; back off and retry
                reconnecting = true;
                thread::sleep(RECONNECT_DELAY);
            }
        });

        Ok(UpdateStream { rx })
    }

    /// Non-blocking poll for pending signals; call once per tick.
    pub fn poll(&self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

/// True for SSE lines that carry a message payload. Comment lines
/// (`: keep-alive`) and blank separators are not signals.
fn is_message_line(line: &str) -> bool {
    line.starts_with("data:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_line_detection() {
        assert!(is_message_line("data: {\"changed\":true}"));
        assert!(is_message_line("data:"));
        assert!(!is_message_line(": keep-alive"));
        assert!(!is_message_line(""));
        assert!(!is_message_line("event: update"));
    }

    #[test]
    fn test_poll_drains_all_pending_signals() {
        let (tx, rx) = mpsc::channel();
        let stream = UpdateStream { rx };
        tx.send(UpdateSignal).unwrap();
        tx.send(UpdateSignal).unwrap();
        assert_eq!(stream.poll(), 2);
        assert_eq!(stream.poll(), 0);
    }
}
