use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn reset(&mut self) {
        self.start = None;
        self.elapsed = Duration::ZERO;
        self.subtimers.clear();
    }

    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    // fold the running interval into `elapsed` and pause children.
    // Only timers that are currently running are affected.
    fn suspend(&mut self) {
        if let Some(instant) = self.start {
            self.elapsed += instant.elapsed();
            self.subtimers.suspend();
        }
    }

    fn resume(&mut self) {
        if self.start.is_some() {
            self.start = Some(Instant::now());
            self.subtimers.resume();
        }
    }
}

#[derive(Debug, Default)]
struct SubTimersMap(HashMap<&'static str, InnerTimer>);

impl Deref for SubTimersMap {
    type Target = HashMap<&'static str, InnerTimer>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for SubTimersMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl SubTimersMap {
    fn reset_subtimer(&mut self, key: &'static str) {
        self.entry(key).or_default().reset();
    }

    fn start_subtimer(&mut self, key: &'static str) {
        self.entry(key).or_default().start();
    }

    fn suspend(&mut self) {
        self.values_mut().for_each(InnerTimer::suspend);
    }

    fn resume(&mut self) {
        self.values_mut().for_each(InnerTimer::resume);
    }

    fn total_time(&self) -> Duration {
        self.values().fold(Duration::ZERO, |acc, t| acc + t.elapsed)
    }

    fn elapsed_of(&self, path: &[&'static str]) -> Option<Duration> {
        let (first, rest) = path.split_first()?;
        let t = self.get(first)?;
        if rest.is_empty() {
            Some(t.elapsed)
        } else {
            t.subtimers.elapsed_of(rest)
        }
    }
}

/// Stack of named, nestable timers.
///
/// Timers started while another is running become its children, so the
/// solver can report e.g. the time spent in "kkt solve" within "solve".
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn active_children(&mut self) -> &mut SubTimersMap {
        let mut children = &mut self.subtimers;
        for key in self.stack.iter() {
            children = &mut children.entry(key).or_default().subtimers;
        }
        children
    }

    pub fn reset_timer(&mut self, key: &'static str) {
        self.subtimers.reset_subtimer(key);
    }

    /// Start a timer with name `key` as a child of the current timer
    pub fn start_as_current(&mut self, key: &'static str) {
        self.active_children().start_subtimer(key);
        self.stack.push(key);
    }

    /// Stop the current timer and make its parent current
    pub fn stop_current(&mut self) {
        if let Some(key) = self.stack.pop() {
            if let Some(t) = self.active_children().get_mut(key) {
                t.stop();
            }
        }
    }

    /// Suspend every timer in the collection.   Used for notimeit!
    pub fn suspend(&mut self) {
        self.subtimers.suspend();
    }

    /// Resume every timer in the collection.   Used for notimeit!
    pub fn resume(&mut self) {
        self.subtimers.resume();
    }

    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    /// Accumulated time of a nested timer, e.g. `&["solve", "kkt solve"]`
    pub fn elapsed(&self, path: &[&'static str]) -> Option<Duration> {
        self.subtimers.elapsed_of(path)
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_timers() {
        let mut timers = Timers::default();
        timeit! {timers => "solve"; {
            timeit!{timers => "kkt solve"; {
                std::thread::sleep(Duration::from_millis(2));
            }}
        }}

        let total = timers.total_time();
        let inner = timers.elapsed(&["solve", "kkt solve"]).unwrap();
        assert!(inner >= Duration::from_millis(2));
        assert!(total >= inner);
        assert!(timers.elapsed(&["nope"]).is_none());

        timers.reset_timer("solve");
        assert_eq!(timers.total_time(), Duration::ZERO);
    }
}
