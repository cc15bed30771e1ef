/// Line-delimited JSON input from the tracking bridge.
///
/// Each line is either a frame (advances the clock) or a contact event:
///
/// ```text
/// {"type":"frame","dt":0.016,"ready":true,"landmarks":{"head":[0,1.6,0]}}
/// {"type":"contact","zone":"left_ankle","limb":"left_foot"}
/// ```
use std::io::BufRead;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use serde::Deserialize;

use crate::landmarks::{Frame, Landmark, LandmarkSet, Pose};
use crate::messaging::{Command, ContactZone};

/// One input line
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedRecord {
    Frame {
        /// Seconds since the previous frame
        dt: f32,
        #[serde(default)]
        ready: bool,
        #[serde(default)]
        landmarks: LandmarkSet,
        #[serde(default)]
        reference: Option<Pose>,
    },
    Contact {
        zone: ContactZone,
        #[serde(default)]
        limb: Option<Landmark>,
    },
}

/// What the tick loop should do with a record
#[derive(Debug, Clone, PartialEq)]
pub enum FeedItem {
    Tick { dt: f32, frame: Frame },
    Command(Command),
}

impl From<FeedRecord> for FeedItem {
    fn from(record: FeedRecord) -> Self {
        match record {
            FeedRecord::Frame {
                dt,
                ready,
                landmarks,
                reference,
            } => FeedItem::Tick {
                dt,
                frame: Frame {
                    ready,
                    landmarks,
                    reference,
                },
            },
            FeedRecord::Contact { zone, limb } => FeedItem::Command(Command::LimbContact { zone, limb }),
        }
    }
}

/// Parse one line; blank lines yield `None`
pub fn parse_line(line: &str) -> Option<Result<FeedItem, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str::<FeedRecord>(line).map(FeedItem::from))
}

/// Read records from `reader` on a background thread until EOF or until the
/// receiver goes away. Malformed lines are logged and skipped.
pub fn spawn_reader<R>(reader: R, items: Sender<FeedItem>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut skipped = 0u64;
        for (number, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Input read failed: {}", e);
                    break;
                }
            };
            match parse_line(&line) {
                None => continue,
                Some(Ok(item)) => {
                    if items.send(item).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    skipped += 1;
                    tracing::warn!("Skipping input line {}: {}", number + 1, e);
                }
            }
        }
        tracing::info!("Input closed ({} malformed lines skipped)", skipped);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use glam::vec3;
    use std::io::Cursor;

    #[test]
    fn test_parse_frame_line() {
        let item = parse_line(
            r#"{"type":"frame","dt":0.02,"ready":true,"landmarks":{"right_hand":[0.1,1.2,0.3]}}"#,
        )
        .unwrap()
        .unwrap();
        let FeedItem::Tick { dt, frame } = item else {
            panic!("expected a tick");
        };
        assert_eq!(dt, 0.02);
        assert!(frame.ready);
        assert_eq!(frame.local(Landmark::RightHand), Some(vec3(0.1, 1.2, 0.3)));
    }

    #[test]
    fn test_parse_contact_line() {
        let item = parse_line(r#"{"type":"contact","zone":"right_ankle"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            item,
            FeedItem::Command(Command::LimbContact {
                zone: ContactZone::RightAnkle,
                limb: None
            })
        );
    }

    #[test]
    fn test_blank_and_bad_lines() {
        assert!(parse_line("   ").is_none());
        assert!(parse_line("{\"type\":\"frame\"}").unwrap().is_err());
    }

    #[test]
    fn test_reader_skips_malformed_lines() {
        let input = "not json\n\n{\"type\":\"frame\",\"dt\":0.016}\n";
        let (tx, rx) = unbounded();
        spawn_reader(Cursor::new(input.as_bytes().to_vec()), tx)
            .join()
            .unwrap();

        let items: Vec<_> = rx.try_iter().collect();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], FeedItem::Tick { .. }));
    }
}
