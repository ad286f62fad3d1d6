#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
    use lenslog::libs::cycle::{LensCycle, LensKind};
    use lenslog::libs::refresh::{countdown, Ended, RefreshTask, Tick};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn cycle(start: NaiveDateTime, hours: i64) -> LensCycle {
        LensCycle {
            start_time: start,
            kind: LensKind::Daily,
            nominal: ChronoDuration::hours(hours),
            pairs_remaining: 0,
            is_active: true,
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_task_finishes_on_its_own() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let task = RefreshTask::spawn(Duration::from_millis(5), move || {
            if counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                Tick::Finished
            } else {
                Tick::Continue
            }
        });

        assert_eq!(task.finished().await, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stop_is_cooperative() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let task = RefreshTask::spawn(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Tick::Continue
        });

        tokio::time::sleep(Duration::from_millis(30)).await;
        let ticks = task.stop().await;

        assert!(ticks >= 1);
        assert_eq!(ticks as u32, calls.load(Ordering::SeqCst));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(ticks as u32, calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let task = RefreshTask::spawn(Duration::from_millis(5), || Tick::Continue);

        let ended = task.run_until(tokio::time::sleep(Duration::from_millis(20))).await;

        assert!(matches!(ended, Ended::Stopped(ticks) if ticks >= 1));
    }

    #[tokio::test]
    async fn test_run_until_reports_finish() {
        let task = RefreshTask::spawn(Duration::from_millis(5), || Tick::Finished);

        let ended = task.run_until(std::future::pending::<()>()).await;

        assert_eq!(ended, Ended::Finished(1));
    }

    #[tokio::test]
    async fn test_countdown_stops_at_zero() {
        let clock = Arc::new(Mutex::new(start()));
        let rendered = Arc::new(Mutex::new(Vec::new()));

        let tick_clock = clock.clone();
        let sink = rendered.clone();
        let on_tick = countdown(
            cycle(start(), 2),
            move || {
                let mut now = tick_clock.lock().unwrap();
                let current = *now;
                *now += ChronoDuration::hours(1);
                current
            },
            move |left| sink.lock().unwrap().push(left),
        );

        let task = RefreshTask::spawn(Duration::from_millis(1), on_tick);
        assert_eq!(task.finished().await, 3);

        let rendered = rendered.lock().unwrap();
        assert_eq!(
            *rendered,
            vec![ChronoDuration::hours(2), ChronoDuration::hours(1), ChronoDuration::zero()]
        );
    }

    #[test]
    fn test_countdown_closure_without_runtime() {
        let mut on_tick = countdown(cycle(start(), 1), || start() + ChronoDuration::minutes(30), |_| {});
        assert_eq!(on_tick(), Tick::Continue);

        let mut on_tick = countdown(cycle(start(), 1), || start() + ChronoDuration::hours(3), |_| {});
        assert_eq!(on_tick(), Tick::Finished);
    }
}
