//! Search-as-you-type: a simulated text box feeds keystrokes through
//! normalisation, duplicate suppression and a 300ms throttle.
//!
//! Run with `RUST_LOG=trace cargo run --example keystroke_filter` to see the
//! engine's own lifecycle logging next to the timestamped values.

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use rxtame::prelude::*;

fn main() {
  env_logger::init();

  let mut pool = LocalPool::new();
  let spawner = pool.spawner();
  let scheduler = LocalScheduler::new(spawner.clone());
  let text_box = EventEmitter::<String>::new();
  let start = scheduler.now();

  let _guard = observable::from_event(text_box.clone())
    .try_map(|text: String| {
      if text.chars().all(|c| !c.is_control()) {
        Ok(text.trim().to_lowercase())
      } else {
        Err(format!("control character in {text:?}"))
      }
    })
    .distinct_until_changed()
    .throttle(Duration::from_millis(300), scheduler.clone())
    .log_timestamped_values_on(scheduler, move |t| {
      log::info!("query {:?} settled after {:?}", t.value, t.timestamp - start)
    })
    .subscribe_all(
      |query| println!("searching for {query:?}"),
      |err| eprintln!("input stream failed: {err}"),
      || println!("input closed"),
    )
    .dispose_when_dropped();

  let keystrokes = [
    ("r", 0),
    ("ru", 90),
    ("rus", 110),
    ("rust", 70),
    ("Rust ", 500),
    ("rust async", 150),
  ];
  let typing = async move {
    for (text, gap) in keystrokes {
      futures_time::task::sleep(Duration::from_millis(gap).into()).await;
      text_box.emit(text.to_owned());
    }
  };
  if let Err(err) = spawner.spawn_local(typing) {
    eprintln!("cannot start the simulated keyboard: {err}");
    return;
  }

  pool.run();
}
