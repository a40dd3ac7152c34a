//! Example: Basic options pricing with Black-Scholes-Merton
//!
//! Run with: cargo run --example basic_pricing

use bsm_greeks::prelude::*;

fn main() {
    // Option parameters
    let spot = 100.0;
    let strike = 100.0;
    let time = 1.0; // 1 year
    let rate = 0.03; // 3% risk-free rate
    let vol = 0.20; // 20% volatility

    println!("=== Black-Scholes-Merton Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let params = OptionParameters::new(spot, strike, time, rate, vol, OptionSide::Call);
    let quote = bs_price(&params);
    println!("Call Price: ${:.4}", quote.call);
    println!("Put Price:  ${:.4}", quote.put);

    // Verify put-call parity: C - P = S - K*e^(-rT)
    let parity_rhs = spot - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", quote.parity_spread());
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.2e}", (quote.parity_spread() - parity_rhs).abs());

    for side in [OptionSide::Call, OptionSide::Put] {
        let greeks = bs_greeks(&params.with_side(side));
        println!("\n=== Greeks ({}) ===\n", side);
        println!("Delta:  {:.4}", greeks.delta);
        println!("Gamma:  {:.6}", greeks.gamma);
        println!("Vega:   {:.4} per vol point", greeks.vega);
        println!("Theta:  {:.4} per day", greeks.theta);
    }

    // Degenerate regimes
    println!("\n=== Boundaries ===\n");
    for (label, p) in [
        ("Expired ATM", OptionParameters { time: 0.0, ..params }),
        ("Expired ITM", OptionParameters { time: 0.0, strike: 90.0, ..params }),
        ("Zero vol", OptionParameters { volatility: 0.0, ..params }),
    ] {
        let q = bs_price(&p);
        println!(
            "{:<12} {:?}: call {:.4}, put {:.4}, delta {:.2}",
            label,
            Regime::of(&p),
            q.call,
            q.put,
            bs_delta(&p, OptionSide::Call)
        );
    }

    // Spot sweep
    println!("\n=== Spot Sweep ===\n");
    match sweep(&params, &SweepConfig::coarse()) {
        Ok(curve) => print!("{}", curve.render_table()),
        Err(e) => println!("Sweep failed: {}", e),
    }
}
