#![cfg(feature = "std")]

use quizship::transport::framing::{encode_frame, read_message, LineFramer};
use quizship::transport::{LineTransport, Transport};
use quizship::{Cell, Message};
use proptest::prelude::*;
use tokio::io::AsyncWriteExt;

fn message_strategy() -> impl Strategy<Value = Message> {
    prop_oneof![
        ".{0,40}".prop_map(|answer| Message::Answer { answer }),
        (0usize..10, 0usize..10).prop_map(|(r, c)| Message::Shot {
            cell: Cell::new(r, c)
        }),
        ".{0,40}".prop_map(|message| Message::TurnSkipped { message }),
        (any::<bool>(), ".{0,40}")
            .prop_map(|(correct, message)| Message::AnswerResult { correct, message }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn any_chunking_yields_the_same_records(
        messages in prop::collection::vec(message_strategy(), 1..8),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..16),
    ) {
        let mut stream = Vec::new();
        for msg in &messages {
            stream.extend(encode_frame(msg).unwrap());
        }
        let mut points: Vec<usize> = cuts.iter().map(|i| i.index(stream.len() + 1)).collect();
        points.push(0);
        points.push(stream.len());
        points.sort_unstable();
        points.dedup();

        let mut framer = LineFramer::new();
        let mut decoded = Vec::new();
        for window in points.windows(2) {
            framer.push(&stream[window[0]..window[1]]);
            while let Some(frame) = framer.next_frame() {
                decoded.push(Message::decode(&frame).unwrap());
            }
        }
        prop_assert_eq!(decoded, messages);
        prop_assert!(framer.carryover().is_empty());
    }
}

#[tokio::test]
async fn two_pipelined_records_in_one_write() -> anyhow::Result<()> {
    let (mut tx, mut rx) = tokio::io::duplex(4096);
    let mut bytes = encode_frame(&Message::Answer {
        answer: "4".to_string(),
    })?;
    bytes.extend(encode_frame(&Message::Shot {
        cell: Cell::new(3, 7),
    })?);
    tx.write_all(&bytes).await?;
    drop(tx);

    let mut framer = LineFramer::new();
    assert_eq!(
        read_message(&mut rx, &mut framer).await?,
        Some(Message::Answer {
            answer: "4".to_string()
        })
    );
    assert_eq!(
        read_message(&mut rx, &mut framer).await?,
        Some(Message::Shot {
            cell: Cell::new(3, 7)
        })
    );
    assert_eq!(read_message(&mut rx, &mut framer).await?, None);
    Ok(())
}

#[tokio::test]
async fn record_delivered_one_byte_at_a_time() -> anyhow::Result<()> {
    let (mut tx, rx) = tokio::io::duplex(64);
    let msg = Message::OpponentTurn {
        message: "Player 1 answering...".to_string(),
    };
    let bytes = encode_frame(&msg)?;
    let writer = tokio::spawn(async move {
        for b in bytes {
            tx.write_all(&[b]).await.unwrap();
            tx.flush().await.unwrap();
            tokio::task::yield_now().await;
        }
    });

    let mut transport = LineTransport::from_stream(rx);
    assert_eq!(transport.recv().await?, Some(msg));
    writer.await?;
    assert_eq!(transport.recv().await?, None);
    Ok(())
}

#[tokio::test]
async fn unterminated_tail_at_eof_is_end_of_stream() -> anyhow::Result<()> {
    let (mut tx, mut rx) = tokio::io::duplex(256);
    tx.write_all(br#"{"type":"answer","answer":"4"}"#).await?;
    drop(tx);

    let mut framer = LineFramer::new();
    assert_eq!(read_message(&mut rx, &mut framer).await?, None);
    assert!(!framer.carryover().is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_record_is_an_error() -> anyhow::Result<()> {
    let (mut tx, mut rx) = tokio::io::duplex(256);
    tx.write_all(b"{not json}\n").await?;
    tx.write_all(br#"{"type":"fire","cell":[1,1]}"#).await?;
    tx.write_all(b"\n").await?;
    drop(tx);

    let mut framer = LineFramer::new();
    assert!(read_message(&mut rx, &mut framer).await.is_err());
    assert!(read_message(&mut rx, &mut framer).await.is_err());
    assert_eq!(read_message(&mut rx, &mut framer).await?, None);
    Ok(())
}

#[tokio::test]
async fn oversized_unterminated_frame_is_rejected() {
    let (mut tx, mut rx) = tokio::io::duplex(4096);
    let writer = tokio::spawn(async move {
        let _ = tx.write_all(&[b'x'; 64]).await;
        tx
    });
    let mut framer = LineFramer::with_limit(16);
    let err = read_message(&mut rx, &mut framer).await.unwrap_err();
    assert!(err.to_string().contains("Frame too large"));
    drop(writer.await);
}

#[tokio::test]
async fn split_transport_halves_talk_both_ways() -> anyhow::Result<()> {
    let (a, b) = tokio::io::duplex(1024);
    let mut left = LineTransport::from_stream(a);
    let mut right = LineTransport::from_stream(b);

    left.send(Message::Answer {
        answer: "19".to_string(),
    })
    .await?;
    right
        .send(Message::AnswerResult {
            correct: true,
            message: "Correct! Take your shot.".to_string(),
        })
        .await?;

    assert!(matches!(right.recv().await?, Some(Message::Answer { answer }) if answer == "19"));
    assert!(matches!(
        left.recv().await?,
        Some(Message::AnswerResult { correct: true, .. })
    ));

    left.close().await?;
    assert_eq!(right.recv().await?, None);
    Ok(())
}
