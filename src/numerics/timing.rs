#![allow(unused)]
use std::cell::RefCell;
use std::time::Duration;

/// Per-pass wall-clock times of coordinate conversions on this thread.
/// Only populated when the `timing` feature is enabled.
#[derive(Default, Clone)]
pub struct TimingStats {
    pub first_pass_times: Vec<Duration>,
    pub second_pass_times: Vec<Duration>,
    pub total_time: Duration,
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversions(&self) -> usize {
        self.first_pass_times.len().min(self.second_pass_times.len())
    }

    #[cfg(feature = "timing")]
    pub fn print_summary(&self) {
        if self.first_pass_times.is_empty() {
            return;
        }

        let total_first: Duration = self.first_pass_times.iter().sum();
        let total_second: Duration = self.second_pass_times.iter().sum();
        let overhead = self.total_time.saturating_sub(total_first + total_second);

        println!("\n{}", "=".repeat(60));
        println!("{:^60}", "CONVERSION TIMING SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "Total time:                    {:.3}ms",
            self.total_time.as_secs_f64() * 1000.0
        );
        println!("{}", "-".repeat(60));
        println!(
            "  First pass:                {:>9.3}ms  (avg: {:>9.3}ms)",
            total_first.as_secs_f64() * 1000.0,
            total_first.as_secs_f64() * 1000.0 / self.first_pass_times.len() as f64
        );
        if !self.second_pass_times.is_empty() {
            println!(
                "  Second pass:               {:>9.3}ms  (avg: {:>9.3}ms)",
                total_second.as_secs_f64() * 1000.0,
                total_second.as_secs_f64() * 1000.0 / self.second_pass_times.len() as f64
            );
        }
        println!(
            "  Overhead/Other:            {:>9.3}ms",
            overhead.as_secs_f64() * 1000.0
        );
        println!("Conversions:                   {}\n", self.conversions());
    }

    #[cfg(not(feature = "timing"))]
    pub fn print_summary(&self) {}
}

#[cfg(feature = "timing")]
thread_local! {
    static TIMING_STATS: RefCell<TimingStats> = RefCell::new(TimingStats::new());
}

#[cfg(feature = "timing")]
pub fn reset_timing() {
    TIMING_STATS.with(|stats| {
        *stats.borrow_mut() = TimingStats::new();
    });
}

#[cfg(not(feature = "timing"))]
pub fn reset_timing() {}

#[cfg(feature = "timing")]
fn timed<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = std::time::Instant::now();
    let result = f();
    (result, start.elapsed())
}

#[cfg(feature = "timing")]
pub fn record_first_pass<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let (result, elapsed) = timed(f);
    TIMING_STATS.with(|stats| stats.borrow_mut().first_pass_times.push(elapsed));
    result
}

#[cfg(not(feature = "timing"))]
pub fn record_first_pass<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}

#[cfg(feature = "timing")]
pub fn record_second_pass<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let (result, elapsed) = timed(f);
    TIMING_STATS.with(|stats| stats.borrow_mut().second_pass_times.push(elapsed));
    result
}

#[cfg(not(feature = "timing"))]
pub fn record_second_pass<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}

#[cfg(feature = "timing")]
pub fn finalize_timing(total_time: Duration) -> TimingStats {
    TIMING_STATS.with(|stats| {
        let mut s = stats.borrow_mut();
        s.total_time = total_time;
        s.clone()
    })
}

#[cfg(not(feature = "timing"))]
pub fn finalize_timing(_total_time: Duration) -> TimingStats {
    TimingStats::new()
}

pub fn finalize_and_print(total_time: Duration) {
    finalize_timing(total_time).print_summary();
}
