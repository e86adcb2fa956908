use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::runtime::{Handle, RuntimeFlavor};

use crate::domain::error::{EngineError, EngineResult};

/// Run an in-process engine call, turning a panic into `EngineError::Panic`
/// so a misbehaving engine fails one request instead of the caller.
pub fn catch_engine_panic<F, T>(f: F) -> EngineResult<T>
where
  F: FnOnce() -> EngineResult<T>,
{
  match catch_unwind(AssertUnwindSafe(f)) {
    Ok(r) => r,
    Err(payload) => {
      let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "validation engine panicked".into());
      tracing::error!(%message, "library engine panicked");
      Err(EngineError::Panic(message))
    }
  }
}

/// Drive an adapter future to completion from synchronous code, whatever
/// runtime (if any) the caller is on.
pub fn run_on_current_thread<F, T>(fut: F) -> EngineResult<T>
where
  F: Future<Output = EngineResult<T>> + Send,
  T: Send,
{
  match Handle::try_current() {
    Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
      tokio::task::block_in_place(|| handle.block_on(fut))
    }
    // block_in_place panics on a current-thread runtime, so the call gets
    // its own thread and runtime while the caller's thread waits.
    Ok(_) => std::thread::scope(|s| {
      s.spawn(|| block_on_fresh_runtime(fut))
        .join()
        .unwrap_or_else(|_| Err(EngineError::Panic("engine runtime thread panicked".into())))
    }),
    Err(_) => block_on_fresh_runtime(fut),
  }
}

fn block_on_fresh_runtime<F, T>(fut: F) -> EngineResult<T>
where
  F: Future<Output = EngineResult<T>>,
{
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .map_err(|e| EngineError::Config(format!("Failed to create tokio runtime: {}", e)))?;
  rt.block_on(fut)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn run_on_current_thread_outside_runtime() {
    let res: EngineResult<()> = run_on_current_thread(async { Ok(()) });
    assert!(res.is_ok());
  }

  #[test]
  fn run_on_current_thread_inside_multithread_runtime() {
    let rt = tokio::runtime::Builder::new_multi_thread()
      .enable_all()
      .build()
      .expect("build rt");
    let res: EngineResult<()> = rt.block_on(async {
      run_on_current_thread(async { Ok(()) })
    });
    assert!(res.is_ok());
  }

  #[test]
  fn run_on_current_thread_inside_current_thread_runtime() {
    let rt = tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .expect("build rt");
    let res: EngineResult<u32> = rt.block_on(async {
      run_on_current_thread(async {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        Ok(7)
      })
    });
    assert_eq!(res.unwrap(), 7);
  }

  #[test]
  fn errors_from_the_future_pass_through() {
    let res: EngineResult<()> =
      run_on_current_thread(async { Err(EngineError::Backend("engine said no".into())) });
    assert!(matches!(res, Err(EngineError::Backend(msg)) if msg == "engine said no"));
  }

  #[test]
  fn panics_become_engine_errors() {
    let res: EngineResult<()> = catch_engine_panic(|| panic!("backend exploded"));
    match res {
      Err(EngineError::Panic(msg)) => assert_eq!(msg, "backend exploded"),
      other => panic!("unexpected: {other:?}"),
    }
  }
}
