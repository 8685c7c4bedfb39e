//! Timer-driven dispatch tests on paused tokio time.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use strictly_bingo::{
    Board, CallSequence, DispatchStop, DispatchTick, Position, Round, RoundPhase, share,
    start_dispatch, start_round_dispatch,
};

const PERIOD: Duration = Duration::from_millis(5_000);

fn column_b_board() -> Board {
    let numbers: Vec<u8> = vec![
        1, 16, 31, 46, 61, //
        2, 17, 32, 47, 62, //
        3, 18, 48, 63, //
        4, 19, 33, 49, 64, //
        5, 20, 34, 50, 65,
    ];
    Board::from_numbers(&numbers).expect("valid board")
}

fn recorder() -> (Arc<Mutex<Vec<DispatchTick>>>, impl FnMut(DispatchTick) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |tick| sink.lock().unwrap().push(tick))
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_runs_to_completion() {
    let calls = CallSequence::parse(&["B1", "I20", "O70"]).unwrap();
    let (seen, on_tick) = recorder();
    let (handle, round) = start_round_dispatch(calls, column_b_board(), PERIOD, on_tick).unwrap();

    assert_eq!(handle.finished().await, DispatchStop::Completed);

    let ticks = seen.lock().unwrap().clone();
    assert_eq!(ticks.len(), 4);
    assert_eq!(ticks[0].eligible, Some(Position::new(0, 0).unwrap()));
    assert_eq!(ticks[1].eligible, Some(Position::new(4, 1).unwrap()));
    assert_eq!(ticks[2].eligible, None);
    assert!(ticks[3].completed);
    assert_eq!(round.lock().await.phase(), RoundPhase::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_first_call_waits_one_period() {
    let calls = CallSequence::parse(&["B1", "B2"]).unwrap();
    let (seen, on_tick) = recorder();
    let (handle, _round) = start_round_dispatch(calls, column_b_board(), PERIOD, on_tick).unwrap();

    tokio::time::sleep(PERIOD - Duration::from_millis(1)).await;
    assert!(seen.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(seen.lock().unwrap().len(), 1);
    handle.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_ticks() {
    let calls = CallSequence::parse(&["B1", "B2", "B3", "B4"]).unwrap();
    let (seen, on_tick) = recorder();
    let (handle, round) = start_round_dispatch(calls, column_b_board(), PERIOD, on_tick).unwrap();

    tokio::time::sleep(PERIOD + Duration::from_millis(1)).await;
    handle.cancel();
    assert!(handle.is_cancelled());
    assert_eq!(handle.finished().await, DispatchStop::Cancelled);

    tokio::time::sleep(PERIOD * 10).await;
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(round.lock().await.phase(), RoundPhase::Running);
}

#[tokio::test(start_paused = true)]
async fn test_bingo_halts_dispatch() {
    let calls = CallSequence::parse(&["B1", "B2", "B3", "B4", "B5", "I20", "O70"]).unwrap();
    let (seen, on_tick) = recorder();
    let (handle, round) = start_round_dispatch(calls, column_b_board(), PERIOD, on_tick).unwrap();

    // Stay 1ms behind the dispatcher so each call is already out.
    tokio::time::sleep(Duration::from_millis(1)).await;
    for row in 0..5 {
        tokio::time::sleep(PERIOD).await;
        let eligible = round.lock().await.eligible();
        assert_eq!(eligible, Some(Position::new(row, 0).unwrap()));
        round.lock().await.attempt_mark(Position::new(row, 0).unwrap());
    }

    assert_eq!(round.lock().await.phase(), RoundPhase::Bingo);
    assert_eq!(handle.finished().await, DispatchStop::Bingo);
    assert_eq!(seen.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn test_zero_period_rejected() {
    let calls = CallSequence::parse(&["B1"]).unwrap();
    let result = start_round_dispatch(calls, column_b_board(), Duration::ZERO, |_| {});
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels() {
    let calls = CallSequence::parse(&["B1", "B2"]).unwrap();
    let (seen, on_tick) = recorder();
    let (handle, _round) = start_round_dispatch(calls, column_b_board(), PERIOD, on_tick).unwrap();
    drop(handle);

    tokio::time::sleep(PERIOD * 5).await;
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reset_retires_old_timer() {
    let calls = CallSequence::parse(&["B1", "B2", "B3"]).unwrap();
    let (old_seen, on_tick) = recorder();
    let (old, round) = start_round_dispatch(calls, column_b_board(), PERIOD, on_tick).unwrap();

    tokio::time::sleep(PERIOD + Duration::from_millis(1)).await;
    assert_eq!(old_seen.lock().unwrap().len(), 1);

    round
        .lock()
        .await
        .reset(column_b_board(), CallSequence::parse(&["I16", "I17", "I18"]).unwrap());
    let (new_seen, on_tick) = recorder();
    let new = start_dispatch(Arc::clone(&round), PERIOD, on_tick).unwrap();

    let stop = tokio::time::timeout(PERIOD * 2, old.finished())
        .await
        .expect("old timer stops after reset");
    assert_eq!(stop, DispatchStop::Superseded);
    assert_eq!(old_seen.lock().unwrap().len(), 1);

    // New round started 1ms after the old one's first tick.
    tokio::time::sleep(PERIOD + Duration::from_millis(2)).await;
    let ticks = new_seen.lock().unwrap().clone();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].index, Some(0));
    assert_eq!(ticks[1].index, Some(1));
    assert_eq!(round.lock().await.cursor().index(), 2);
    new.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_second_dispatcher_takes_over() {
    let calls = CallSequence::parse(&["B1", "B2", "B3", "B4"]).unwrap();
    let round = share(Round::new(column_b_board(), calls));

    let (first_seen, on_tick) = recorder();
    let first = start_dispatch(Arc::clone(&round), PERIOD, on_tick).unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;

    let (second_seen, on_tick) = recorder();
    let second = start_dispatch(Arc::clone(&round), PERIOD, on_tick).unwrap();

    tokio::time::sleep(PERIOD * 2 + Duration::from_millis(2)).await;
    assert_eq!(first.finished().await, DispatchStop::Superseded);
    assert!(first_seen.lock().unwrap().is_empty());
    assert_eq!(second_seen.lock().unwrap().len(), 2);
    assert_eq!(round.lock().await.cursor().index(), 2);
    second.cancel();
}
