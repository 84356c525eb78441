//! Concrete end-to-end scenarios against the public `MatchingEngine` API.

use matching_core::{CancelReason, Condition, EngineConfig, MatchingEngine, Order, OrderStatus, ResultCode, Side};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn engine() -> MatchingEngine {
    MatchingEngine::new(EngineConfig::default())
}

fn limit(side: Side, price: rust_decimal::Decimal, volume: rust_decimal::Decimal, condition: Condition) -> Order {
    Order::new(Uuid::new_v4(), side, price, volume, condition, "t", None, 0)
}

#[test]
fn scenario_1_simple_cross() {
    let mut eng = engine();
    let a = limit(Side::Sell, dec!(100), dec!(5), Condition::None);
    let a_id = a.id;
    assert_eq!(eng.add_order(a, 0), ResultCode::OrderAccepted);

    let b = limit(Side::Buy, dec!(100), dec!(3), Condition::None);
    let b_id = b.id;
    assert_eq!(eng.add_order(b, 1), ResultCode::OrderAccepted);

    assert_eq!(eng.trades().len(), 1);
    assert_eq!(eng.trades()[0].price, dec!(100));
    assert_eq!(eng.trades()[0].volume, dec!(3));

    let a_after = eng.find(a_id).unwrap();
    assert_eq!(a_after.remaining, dec!(2));
    assert_eq!(a_after.status, OrderStatus::Matched);
    assert!(eng.find(b_id).is_none());

    assert_eq!(eng.best_ask_price(), Some(dec!(100)));
    assert_eq!(eng.best_ask_volume(), Some(dec!(2)));
    assert_eq!(eng.best_bid_price(), None);
}

#[test]
fn scenario_2_walk_the_book() {
    let mut eng = engine();
    eng.add_order(limit(Side::Sell, dec!(100), dec!(1), Condition::None), 0);
    eng.add_order(limit(Side::Sell, dec!(101), dec!(2), Condition::None), 0);
    eng.add_order(limit(Side::Sell, dec!(102), dec!(10), Condition::None), 0);

    let x = limit(Side::Buy, dec!(101), dec!(5), Condition::None);
    let x_id = x.id;
    assert_eq!(eng.add_order(x, 1), ResultCode::OrderAccepted);

    assert_eq!(eng.trades().len(), 2);
    assert_eq!((eng.trades()[0].price, eng.trades()[0].volume), (dec!(100), dec!(1)));
    assert_eq!((eng.trades()[1].price, eng.trades()[1].volume), (dec!(101), dec!(2)));

    let x_after = eng.find(x_id).unwrap();
    assert_eq!(x_after.remaining, dec!(2));
    assert_eq!(x_after.price, dec!(101));

    assert_eq!(eng.best_ask_price(), Some(dec!(102)));
    assert_eq!(eng.best_ask_volume(), Some(dec!(10)));
    assert_eq!(eng.best_bid_price(), Some(dec!(101)));
    assert_eq!(eng.best_bid_volume(), Some(dec!(2)));

    // Scenario 8 picks up from here: cancel X.
    let code = eng.cancel_order(x_id);
    assert_eq!(code, ResultCode::CancelAccepted);
    assert_eq!(eng.best_bid_price(), None);
    assert_eq!(eng.bid_level_count(), 0);
    assert!(eng.find(x_id).is_none());
}

#[test]
fn scenario_3_boc_reject() {
    let mut eng = engine();
    eng.add_order(limit(Side::Sell, dec!(100), dec!(1), Condition::None), 0);

    let x = limit(Side::Buy, dec!(100), dec!(1), Condition::Boc);
    let code = eng.add_order(x, 1);

    assert_eq!(code, ResultCode::BOCCannotBook);
    assert_eq!(eng.bid_level_count(), 0);
    assert_eq!(eng.total_orders(), 1);
    assert_eq!(eng.trades().len(), 0);
}

#[test]
fn scenario_4_fok_kill() {
    let mut eng = engine();
    eng.add_order(limit(Side::Sell, dec!(100), dec!(1), Condition::None), 0);
    eng.add_order(limit(Side::Sell, dec!(101), dec!(1), Condition::None), 0);

    let x = limit(Side::Buy, dec!(101), dec!(5), Condition::Fok);
    let code = eng.add_order(x, 1);

    assert_eq!(code, ResultCode::FOKCannotFill);
    assert_eq!(eng.trades().len(), 0);
    assert_eq!(eng.best_ask_price(), Some(dec!(100)));
    assert_eq!(eng.best_ask_volume(), Some(dec!(1)));
    assert_eq!(eng.depth_at(Side::Sell, dec!(101)).unwrap().volume, dec!(1));
}

#[test]
fn scenario_5_fok_fill() {
    let mut eng = engine();
    eng.add_order(limit(Side::Sell, dec!(100), dec!(1), Condition::None), 0);
    eng.add_order(limit(Side::Sell, dec!(101), dec!(1), Condition::None), 0);
    let c = limit(Side::Sell, dec!(102), dec!(10), Condition::None);
    let c_id = c.id;
    eng.add_order(c, 0);

    let x = limit(Side::Buy, dec!(102), dec!(5), Condition::Fok);
    let x_id = x.id;
    let code = eng.add_order(x, 1);

    assert_eq!(code, ResultCode::OrderAccepted);
    assert_eq!(eng.trades().len(), 3);
    assert_eq!((eng.trades()[0].price, eng.trades()[0].volume), (dec!(100), dec!(1)));
    assert_eq!((eng.trades()[1].price, eng.trades()[1].volume), (dec!(101), dec!(1)));
    assert_eq!((eng.trades()[2].price, eng.trades()[2].volume), (dec!(102), dec!(3)));

    // X was fully matched and never rests: the engine does not hand back a
    // filled order, and a FOK order never appears in the book either way.
    assert!(eng.find(x_id).is_none());
    assert_eq!(eng.find(c_id).unwrap().remaining, dec!(7));
}

#[test]
fn scenario_6_market_buy_no_liquidity() {
    let mut eng = engine();
    let x = limit(Side::Buy, dec!(0), dec!(3), Condition::None);
    let code = eng.add_order(x, 1);

    assert_eq!(code, ResultCode::MarketNoLiquidity);
    assert_eq!(eng.trades().len(), 0);
    assert_eq!(eng.total_orders(), 0);
}

#[test]
fn scenario_7_ioc_partial() {
    let mut eng = engine();
    eng.add_order(limit(Side::Sell, dec!(100), dec!(2), Condition::None), 0);

    let x = limit(Side::Buy, dec!(100), dec!(5), Condition::Ioc);
    let code = eng.add_order(x, 1);

    assert_eq!(code, ResultCode::OrderAccepted);
    assert_eq!(eng.trades().len(), 1);
    assert_eq!((eng.trades()[0].price, eng.trades()[0].volume), (dec!(100), dec!(2)));
    assert_eq!(eng.best_ask_price(), None);
    assert_eq!(eng.total_orders(), 0);
}

#[test]
fn scenario_8_cancel_of_resting_order() {
    // Covered inline at the end of scenario_2_walk_the_book, which shares its
    // setup; kept here too as its own scenario per the concrete test list.
    let mut eng = engine();
    eng.add_order(limit(Side::Sell, dec!(100), dec!(1), Condition::None), 0);
    eng.add_order(limit(Side::Sell, dec!(101), dec!(2), Condition::None), 0);
    eng.add_order(limit(Side::Sell, dec!(102), dec!(10), Condition::None), 0);
    let x = limit(Side::Buy, dec!(101), dec!(5), Condition::None);
    let x_id = x.id;
    eng.add_order(x, 1);

    let code = eng.cancel_order(x_id);

    assert_eq!(code, ResultCode::CancelAccepted);
    assert_eq!(eng.best_bid_price(), None);
    assert_eq!(eng.bid_level_count(), 0);
}

#[test]
fn cancel_unknown_id_is_no_op() {
    let mut eng = engine();
    assert_eq!(eng.cancel_order(Uuid::new_v4()), ResultCode::OrderNotExists);
}

#[test]
fn add_then_cancel_without_match_restores_empty_book() {
    let mut eng = engine();
    let o = limit(Side::Buy, dec!(50), dec!(1), Condition::None);
    let id = o.id;
    eng.add_order(o, 0);
    assert_eq!(eng.total_orders(), 1);

    eng.cancel_order(id);
    assert_eq!(eng.total_orders(), 0);
    assert_eq!(eng.bid_level_count(), 0);
    assert_eq!(eng.best_bid_price(), None);
}

#[test]
fn negative_volume_is_rejected_without_booking() {
    let mut eng = engine();
    let o = limit(Side::Buy, dec!(100), dec!(-1), Condition::None);
    let code = eng.add_order(o, 0);
    assert_eq!(code, ResultCode::OrderInvalid);
    assert_eq!(eng.total_orders(), 0);
}
