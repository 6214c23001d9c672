// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::future::Future;
use std::pin::Pin;

/// A boxed future produced by one deferred task.
pub type TaskFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A deferred task: nothing runs until the serial runner calls it.
pub type Task<'a, T, E> = Box<dyn FnOnce() -> TaskFuture<'a, T, E> + Send + 'a>;

/// Runs `tasks` strictly one after another, collecting results in input
/// order.
///
/// Task `i + 1` is not even constructed until task `i` has completed:
/// benchmark iterations must never share CPU or I/O with each other, or the
/// timings are meaningless. The first failure short-circuits the whole
/// sequence; the remaining tasks are dropped uninvoked and no partial
/// results are returned.
pub async fn run_serial<'a, T, E>(tasks: Vec<Task<'a, T, E>>) -> Result<Vec<T>, E> {
  let mut results = Vec::with_capacity(tasks.len());
  for task in tasks {
    results.push(task().await?);
  }
  Ok(results)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;
  use std::sync::Mutex;
  use std::sync::atomic::AtomicBool;
  use std::sync::atomic::Ordering;
  use std::time::Duration;

  fn task<'a, F, Fut, T, E>(f: F) -> Task<'a, T, E>
  where
    F: FnOnce() -> Fut + Send + 'a,
    Fut: Future<Output = Result<T, E>> + Send + 'a,
  {
    Box::new(move || Box::pin(f()))
  }

  #[tokio::test]
  async fn results_come_back_in_input_order_without_overlap() {
    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    // The first task sleeps longest; if anything ran concurrently, its
    // start event would land before an earlier task's end event.
    let mut tasks: Vec<Task<'static, u32, String>> = Vec::new();
    for (i, delay_ms) in [30u64, 1, 10].into_iter().enumerate() {
      let events = Arc::clone(&events);
      tasks.push(task(move || async move {
        events.lock().unwrap().push(format!("start {i}"));
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        events.lock().unwrap().push(format!("end {i}"));
        Ok(i as u32)
      }));
    }

    let results = run_serial(tasks).await.unwrap();

    assert_eq!(results, vec![0, 1, 2]);
    assert_eq!(
      *events.lock().unwrap(),
      vec!["start 0", "end 0", "start 1", "end 1", "start 2", "end 2"]
    );
  }

  #[tokio::test]
  async fn first_failure_short_circuits() {
    let fourth_ran = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&fourth_ran);
    let tasks: Vec<Task<'static, u32, String>> = vec![
      task(|| async { Ok(1) }),
      task(|| async { Ok(2) }),
      task(|| async { Err("boom".to_string()) }),
      task(move || async move {
        flag.store(true, Ordering::SeqCst);
        Ok(3)
      }),
    ];

    let err = run_serial(tasks).await.unwrap_err();

    assert_eq!(err, "boom");
    assert!(!fourth_ran.load(Ordering::SeqCst));
  }

  #[tokio::test]
  async fn empty_input_yields_empty_output() {
    let tasks: Vec<Task<'static, u32, String>> = Vec::new();
    assert!(run_serial(tasks).await.unwrap().is_empty());
  }
}
