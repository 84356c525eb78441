//! Property tests over random order streams, checking invariants that must
//! hold after every operation regardless of the exact sequence applied.

use matching_core::{Condition, EngineConfig, MatchingEngine, Order, Side};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Op {
    Add { side: Side, price: i64, volume: i64, condition: Condition },
    CancelRandom,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (
            prop::bool::ANY,
            1i64..20,
            1i64..10,
            prop::sample::select(vec![Condition::None, Condition::Ioc, Condition::Boc, Condition::Fok]),
        )
            .prop_map(|(is_buy, price, volume, condition)| Op::Add {
                side: if is_buy { Side::Buy } else { Side::Sell },
                price,
                volume,
                condition,
            }),
        1 => Just(Op::CancelRandom),
    ]
}

fn run_ops(ops: &[Op]) -> (MatchingEngine, Vec<Uuid>) {
    let mut engine = MatchingEngine::new(EngineConfig::default());
    let mut resting_ids = Vec::new();
    let mut ts = 0i64;

    for op in ops {
        ts += 1;
        match op {
            Op::Add { side, price, volume, condition } => {
                let order = Order::new(
                    Uuid::new_v4(),
                    *side,
                    Decimal::from(*price),
                    Decimal::from(*volume),
                    *condition,
                    "prop-trader",
                    None,
                    ts,
                );
                let id = order.id;
                engine.add_order(order, ts);
                if engine.find(id).is_some() {
                    resting_ids.push(id);
                }
            }
            Op::CancelRandom => {
                if let Some(id) = resting_ids.pop() {
                    engine.cancel_order(id);
                }
            }
        }
    }
    (engine, resting_ids)
}

proptest! {
    /// P4: crossed best prices never persist after any admitted operation.
    #[test]
    fn best_bid_never_at_or_above_best_ask(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let (engine, _) = run_ops(&ops);
        if let (Some(bid), Some(ask)) = (engine.best_bid_price(), engine.best_ask_price()) {
            prop_assert!(bid < ask);
        }
    }

    /// P2/P3: every resting order found by id matches the book's own view of
    /// its price level depth, and is actually present at the reported price.
    #[test]
    fn resting_orders_are_consistent_with_their_level(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let (mut engine, resting_ids) = run_ops(&ops);
        for id in resting_ids {
            if let Some(order) = engine.find(id) {
                let depth = engine.depth_at(order.side, order.price);
                prop_assert!(depth.is_some());
                prop_assert!(depth.unwrap().volume >= order.remaining);
            }
        }
        // total_orders must agree with a fresh snapshot's order counts.
        let snap = engine.snapshot(0);
        let counted: usize = snap.bids.iter().chain(snap.asks.iter()).map(|l| l.order_count).sum();
        prop_assert_eq!(counted, engine.total_orders());
    }

    /// P7: a rejected BOC order never leaves a trade behind and never rests
    /// partially consumed — it is admitted whole or not at all.
    #[test]
    fn boc_orders_never_partially_fill(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut engine = MatchingEngine::new(EngineConfig::default());
        let mut ts = 0i64;
        for op in &ops {
            ts += 1;
            if let Op::Add { side, price, volume, .. } = op {
                let order = Order::new(
                    Uuid::new_v4(), *side, Decimal::from(*price), Decimal::from(*volume),
                    Condition::Boc, "prop-trader", None, ts,
                );
                let id = order.id;
                let trades_before = engine.trades().len();
                engine.add_order(order, ts);
                if let Some(resting) = engine.find(id) {
                    prop_assert_eq!(resting.remaining, Decimal::from(*volume));
                    prop_assert_eq!(engine.trades().len(), trades_before);
                }
            }
        }
    }

    /// Cancelling an unknown id is always a no-op on book shape.
    #[test]
    fn cancel_unknown_id_never_mutates_counts(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let (mut engine, _) = run_ops(&ops);
        let before = (engine.total_orders(), engine.bid_level_count(), engine.ask_level_count());
        engine.cancel_order(Uuid::new_v4());
        let after = (engine.total_orders(), engine.bid_level_count(), engine.ask_level_count());
        prop_assert_eq!(before, after);
    }
}
