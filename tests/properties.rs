//! Property tests for the pricing engine across the standard regime and its
//! boundaries.

use approx::assert_relative_eq;
use proptest::prelude::*;

use bsm_greeks::prelude::*;

fn standard_inputs() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
    (
        1.0..500.0_f64,  // spot
        1.0..500.0_f64,  // strike
        0.01..5.0_f64,   // time
        -0.02..0.15_f64, // rate
        0.01..1.5_f64,   // volatility
    )
}

fn call(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> OptionParameters {
    OptionParameters::new(spot, strike, time, rate, vol, OptionSide::Call)
}

proptest! {
    #[test]
    fn put_call_parity((s, k, t, r, v) in standard_inputs()) {
        let quote = bs_price(&call(s, k, t, r, v));
        let forward_value = s - k * (-r * t).exp();
        let scale = s.max(k);
        prop_assert!((quote.parity_spread() - forward_value).abs() <= 1e-6 * scale);
    }

    #[test]
    fn delta_bounds((s, k, t, r, v) in standard_inputs()) {
        let p = call(s, k, t, r, v);
        let call_delta = bs_delta(&p, OptionSide::Call);
        let put_delta = bs_delta(&p, OptionSide::Put);
        prop_assert!((0.0..=1.0).contains(&call_delta));
        prop_assert!((-1.0..=0.0).contains(&put_delta));
        prop_assert!((call_delta - put_delta - 1.0).abs() < 1e-12);
    }

    #[test]
    fn gamma_vega_non_negative((s, k, t, r, v) in standard_inputs()) {
        let p = call(s, k, t, r, v);
        prop_assert!(bs_gamma(&p) >= 0.0);
        prop_assert!(bs_vega(&p) >= 0.0);
        prop_assert_eq!(bs_gamma(&p), bs_gamma(&p.with_side(OptionSide::Put)));
        prop_assert_eq!(bs_vega(&p), bs_vega(&p.with_side(OptionSide::Put)));
    }

    #[test]
    fn monotone_in_spot((s, k, t, r, v) in standard_inputs(), bump in 0.01..50.0_f64) {
        let low = bs_price(&call(s, k, t, r, v));
        let high = bs_price(&call(s + bump, k, t, r, v));
        prop_assert!(high.call >= low.call - 1e-9);
        prop_assert!(high.put <= low.put + 1e-9);
    }

    #[test]
    fn prices_never_below_zero_or_nan(
        s in -100.0..500.0_f64,
        k in -10.0..500.0_f64,
        t in -1.0..5.0_f64,
        r in -0.02..0.15_f64,
        v in -0.5..1.5_f64,
    ) {
        let p = call(s, k, t, r, v);
        let quote = bs_price(&p);
        prop_assert!(quote.call.is_finite() && quote.call >= 0.0);
        prop_assert!(quote.put.is_finite() && quote.put >= 0.0);

        for side in [OptionSide::Call, OptionSide::Put] {
            prop_assert!(bs_delta(&p, side).is_finite());
            prop_assert!(bs_theta(&p, side).is_finite());
        }
        prop_assert!(bs_gamma(&p).is_finite() && bs_gamma(&p) >= 0.0);
        prop_assert!(bs_vega(&p).is_finite() && bs_vega(&p) >= 0.0);
    }
}

#[test]
fn sigma_to_zero_converges_to_zero_vol_regime() {
    for spot in [80.0, 97.0, 100.0, 120.0] {
        let limit = bs_price(&call(spot, 100.0, 1.0, 0.03, 0.0));
        let near = bs_price(&call(spot, 100.0, 1.0, 0.03, 1e-7));
        assert!((near.call - limit.call).abs() < 1e-4, "spot {}", spot);
        assert!((near.put - limit.put).abs() < 1e-4, "spot {}", spot);
    }
}

#[test]
fn time_to_zero_converges_to_intrinsic() {
    for spot in [80.0, 99.0, 100.0, 101.0, 120.0] {
        let limit = bs_price(&call(spot, 100.0, 0.0, 0.03, 0.2));
        let near = bs_price(&call(spot, 100.0, 1e-9, 0.03, 0.2));
        assert!((near.call - limit.call).abs() < 1e-3, "spot {}", spot);
        assert!((near.put - limit.put).abs() < 1e-3, "spot {}", spot);
    }
}

#[test]
fn reference_scenarios() {
    let standard = call(100.0, 100.0, 1.0, 0.03, 0.20);
    let quote = bs_price(&standard);
    assert_relative_eq!(quote.call, 9.4134, epsilon = 1e-3);
    assert_relative_eq!(quote.put, 6.4580, epsilon = 1e-3);

    let call_delta = bs_delta(&standard, OptionSide::Call);
    let put_delta = bs_delta(&standard, OptionSide::Put);
    assert_relative_eq!(call_delta, 0.5987, epsilon = 1e-4);
    assert_relative_eq!(put_delta, -0.4013, epsilon = 1e-4);
    assert_eq!(call_delta - put_delta, 1.0);

    assert!(bs_gamma(&standard) > 0.0);
    assert!(bs_vega(&standard) > 0.0);

    assert_eq!(bs_price(&call(100.0, 100.0, 0.0, 0.03, 0.20)), PriceQuote::new(0.0, 0.0));
    assert_eq!(bs_price(&call(100.0, 90.0, 0.0, 0.03, 0.20)), PriceQuote::new(10.0, 0.0));

    let zero_vol = bs_price(&call(100.0, 100.0, 1.0, 0.03, 0.0));
    assert_relative_eq!(zero_vol.call, 2.9554, epsilon = 1e-4);
    assert_eq!(zero_vol.put, 0.0);
}

#[test]
fn fallback_market_prices_without_special_cases() {
    let defaults = MarketDefaults::default();
    let p = OptionParameters::new(
        defaults.spot,
        defaults.spot,
        30.0 / 365.0,
        defaults.rate,
        defaults.volatility,
        OptionSide::Put,
    );
    assert_eq!(Regime::of(&p), Regime::Standard);
    let g = bs_greeks(&p);
    assert!(g.delta < 0.0 && g.delta > -1.0);
    assert!(g.theta < 0.0);
}

#[test]
fn vanishing_vol_time_product_stays_finite() {
    // Standard regime with σ√T at or below the smallest normal f64
    let tiny = [(1e-100, 1e-300), (1e-16, 1e-310), (1.0, 3e-308), (1e-300, 1e-200)];
    for (time, vol) in tiny {
        for spot in [50.0, 99.0, 100.0, 101.0, 1e10] {
            for rate in [0.0, 0.03] {
                let p = OptionParameters::new(spot, 100.0, time, rate, vol, OptionSide::Call);
                assert_eq!(Regime::of(&p), Regime::Standard);

                let quote = bs_price(&p);
                assert!(quote.call.is_finite() && quote.call >= 0.0, "{:?}", p);
                assert!(quote.put.is_finite() && quote.put >= 0.0, "{:?}", p);
                for side in [OptionSide::Call, OptionSide::Put] {
                    let d = bs_delta(&p, side);
                    assert!(d.is_finite() && d.abs() <= 1.0, "{:?} {}", p, side);
                    assert!(bs_theta(&p, side).is_finite(), "{:?} {}", p, side);
                }
                let gamma = bs_gamma(&p);
                let vega = bs_vega(&p);
                assert!(gamma.is_finite() && gamma >= 0.0, "{:?}", p);
                assert!(vega.is_finite() && vega >= 0.0, "{:?}", p);
            }
        }
    }
}
