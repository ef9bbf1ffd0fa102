//! 이름 있는 작업 스케줄러.
//!
//! 작업마다 별도 태스크에서 실행되며, 한 작업의 실행은 서로 겹치지 않습니다.
//! 공유 `CancellationToken`이 취소되면 모든 작업 루프가 종료됩니다.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use gold_core::GoldError;

/// 스케줄러 에러.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("스케줄러가 이미 시작됨")]
    AlreadyStarted,
}

impl From<SchedulerError> for GoldError {
    fn from(err: SchedulerError) -> Self {
        GoldError::Config(err.to_string())
    }
}

/// 작업 실행 시점.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// 고정 간격 (첫 실행은 한 간격 뒤)
    Interval(Duration),
    /// 매일 로컬 시각
    DailyAt(NaiveTime),
    /// 시작 직후 한 번
    Once,
}

type JobFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// 이름 있는 작업.
#[derive(Clone)]
pub struct Job {
    name: String,
    trigger: Trigger,
    run: JobFn,
}

impl Job {
    /// 호출할 때마다 새 future를 만드는 클로저로 작업을 생성합니다.
    pub fn new<F, Fut>(name: impl Into<String>, trigger: Trigger, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            name: name.into(),
            trigger,
            run: Arc::new(move || f().boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .finish()
    }
}

/// 백그라운드 작업 스케줄러.
pub struct Scheduler {
    tz: Tz,
    jobs: Vec<Job>,
    started: AtomicBool,
}

impl Scheduler {
    /// `DailyAt` 시각을 해석할 시간대로 생성합니다.
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            jobs: Vec::new(),
            started: AtomicBool::new(false),
        }
    }

    /// 작업 등록.
    pub fn add_job(&mut self, job: Job) -> &mut Self {
        self.jobs.push(job);
        self
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// 모든 작업을 각자의 태스크로 시작합니다.
    ///
    /// 스케줄러당 한 번만 성공하며, 두 번째 호출은 [`SchedulerError::AlreadyStarted`]입니다.
    pub fn start(
        &self,
        shutdown_token: CancellationToken,
    ) -> Result<Vec<JoinHandle<()>>, SchedulerError> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SchedulerError::AlreadyStarted);
        }

        info!(jobs = self.jobs.len(), timezone = %self.tz, "스케줄러 시작");

        Ok(self
            .jobs
            .iter()
            .cloned()
            .map(|job| tokio::spawn(run_job(job, self.tz, shutdown_token.clone())))
            .collect())
    }
}

async fn run_job(job: Job, tz: Tz, shutdown_token: CancellationToken) {
    info!(job = %job.name, trigger = ?job.trigger, "작업 등록");

    match job.trigger {
        Trigger::Once => {
            tokio::select! {
                _ = shutdown_token.cancelled() => {}
                _ = (job.run)() => {
                    debug!(job = %job.name, "1회 작업 완료");
                }
            }
        }
        Trigger::Interval(period) => {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_token.cancelled() => break,
                    _ = ticker.tick() => {
                        debug!(job = %job.name, "주기 작업 실행");
                        (job.run)().await;
                    }
                }
            }
        }
        Trigger::DailyAt(at) => loop {
            let wait = duration_until_next(Utc::now().with_timezone(&tz), at);
            debug!(job = %job.name, wait_secs = wait.as_secs(), "다음 일일 실행까지 대기");

            tokio::select! {
                _ = shutdown_token.cancelled() => break,
                _ = tokio::time::sleep(wait) => {
                    info!(job = %job.name, "일일 작업 실행");
                    (job.run)().await;
                }
            }
        },
    }

    info!(job = %job.name, "작업 종료");
}

/// `now` 이후 처음 오는 로컬 시각 `at`까지 남은 시간.
///
/// 일광 절약 시간으로 해당 시각이 없는 날은 건너뜁니다.
pub fn duration_until_next(now: DateTime<Tz>, at: NaiveTime) -> Duration {
    let tz = now.timezone();
    let mut date = now.date_naive();

    for _ in 0..3 {
        if let Some(target) = tz.from_local_datetime(&date.and_time(at)).earliest() {
            if target > now {
                return (target - now).to_std().unwrap_or(Duration::ZERO);
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    Duration::from_secs(24 * 60 * 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Taipei;
    use std::sync::atomic::AtomicUsize;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn counting_job(name: &str, trigger: Trigger) -> (Job, Arc<AtomicUsize>) {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let job = Job::new(name, trigger, move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });
        (job, counter)
    }

    #[test]
    fn test_duration_until_later_today() {
        let now = Taipei.with_ymd_and_hms(2024, 1, 2, 7, 30, 0).unwrap();
        assert_eq!(duration_until_next(now, at(8, 0)), Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_duration_until_tomorrow() {
        let now = Taipei.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        assert_eq!(duration_until_next(now, at(8, 0)), Duration::from_secs(23 * 60 * 60));

        // 정각이면 다음 날
        let now = Taipei.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
        assert_eq!(duration_until_next(now, at(8, 0)), Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn test_duration_skips_dst_gap() {
        // 2024-03-10 02:30은 뉴욕에 존재하지 않는 시각
        let now = chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 3, 10, 1, 0, 0)
            .unwrap();
        let wait = duration_until_next(now, at(2, 30));
        // 다음 날 02:30 EDT, 벽시계로 25.5시간이지만 실제 경과는 24.5시간
        assert_eq!(wait, Duration::from_secs(24 * 60 * 60 + 30 * 60));
    }

    #[tokio::test]
    async fn test_start_only_once() {
        let mut scheduler = Scheduler::new(Taipei);
        let (job, _) = counting_job("noop", Trigger::Once);
        scheduler.add_job(job);

        let token = CancellationToken::new();
        let handles = scheduler.start(token.clone()).unwrap();
        assert_eq!(handles.len(), 1);
        assert_eq!(
            scheduler.start(token.clone()).unwrap_err(),
            SchedulerError::AlreadyStarted
        );

        token.cancel();
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_once_job_runs_immediately() {
        let mut scheduler = Scheduler::new(Taipei);
        let (job, counter) = counting_job("startup", Trigger::Once);
        scheduler.add_job(job);

        let handles = scheduler.start(CancellationToken::new()).unwrap();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_job_runs_each_period_until_cancelled() {
        let mut scheduler = Scheduler::new(Taipei);
        let (job, counter) = counting_job("refresh", Trigger::Interval(Duration::from_secs(60)));
        scheduler.add_job(job);

        let token = CancellationToken::new();
        let handles = scheduler.start(token.clone()).unwrap();

        tokio::time::sleep(Duration::from_secs(150)).await;
        token.cancel();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_daily_job_stops_on_cancel() {
        let mut scheduler = Scheduler::new(Taipei);
        let (job, counter) = counting_job("daily", Trigger::DailyAt(at(8, 0)));
        scheduler.add_job(job);

        let token = CancellationToken::new();
        let handles = scheduler.start(token.clone()).unwrap();
        token.cancel();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
