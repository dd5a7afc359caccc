//! 1バッチ分の並行解析
//!
//! 各ファイルは決着した順に `on_settled` へ渡される。未完了バッチ数は
//! バッチ全体が決着するまで減らない。

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use leptos::prelude::*;

/// 未完了バッチ数のカウンタ
pub trait PendingCounter {
    fn begin(&self);
    fn end(&self);
}

impl PendingCounter for RwSignal<u32> {
    fn begin(&self) {
        self.update(|n| *n += 1);
    }

    fn end(&self) {
        self.update(|n| *n = n.saturating_sub(1));
    }
}

/// バッチの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// 全件を同時に処理し、すべて決着してから戻る
///
/// 1件の失敗は他の件に影響しない。
pub async fn run_batch<T, R, F, Fut, S>(
    items: Vec<T>,
    counter: &impl PendingCounter,
    analyze: F,
    mut on_settled: S,
) -> BatchSummary
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, String>>,
    S: FnMut(Result<R, String>),
{
    let mut summary = BatchSummary::default();
    if items.is_empty() {
        return summary;
    }

    counter.begin();

    let mut pending: FuturesUnordered<Fut> = items.into_iter().map(&analyze).collect();
    while let Some(result) = pending.next().await {
        if result.is_ok() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }
        on_settled(result);
    }

    counter.end();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct CellCounter(Cell<u32>);

    impl PendingCounter for CellCounter {
        fn begin(&self) {
            self.0.set(self.0.get() + 1);
        }

        fn end(&self) {
            self.0.set(self.0.get() - 1);
        }
    }

    async fn fake_analyze(i: u32) -> Result<u32, String> {
        if i == 2 {
            Err(format!("{}: Failed to analyze image", i))
        } else {
            Ok(i * 10)
        }
    }

    #[test]
    fn test_failure_only_drops_its_own_item() {
        let counter = CellCounter::default();
        let mut ok = Vec::new();

        let summary = block_on(run_batch(
            (0..5).collect(),
            &counter,
            fake_analyze,
            |result| {
                if let Ok(v) = result {
                    ok.push(v);
                }
            },
        ));

        assert_eq!(summary, BatchSummary { succeeded: 4, failed: 1 });
        ok.sort();
        assert_eq!(ok, vec![0, 10, 30, 40]);
    }

    #[test]
    fn test_counter_held_until_every_item_settles() {
        let counter = CellCounter::default();
        let seen = RefCell::new(Vec::new());

        block_on(run_batch((0..4).collect(), &counter, fake_analyze, |_| {
            seen.borrow_mut().push(counter.0.get());
        }));

        // 各件の決着時点ではまだ未完了扱い
        assert_eq!(*seen.borrow(), vec![1, 1, 1, 1]);
        assert_eq!(counter.0.get(), 0);
    }

    #[test]
    fn test_empty_batch_leaves_counter_alone() {
        let counter = CellCounter::default();
        let summary = block_on(run_batch(Vec::<u32>::new(), &counter, fake_analyze, |_| {
            panic!("空のバッチで呼ばれるべきでない")
        }));

        assert_eq!(summary, BatchSummary::default());
        assert_eq!(counter.0.get(), 0);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_signal_counter_returns_to_zero() {
        let pending = RwSignal::new(0u32);
        let observed = RwSignal::new(Vec::<u32>::new());

        run_batch(
            vec![1u32, 2, 3],
            &pending,
            |i| async move { if i == 2 { Err("x".to_string()) } else { Ok(i) } },
            |_| observed.update(|v| v.push(pending.get_untracked())),
        )
        .await;

        assert_eq!(observed.get_untracked(), vec![1, 1, 1]);
        assert_eq!(pending.get_untracked(), 0);
    }
}
