//! Basic usage of pwm-lightness tables.

use pwm_lightness::{TableCache, cie1931_f64, get_table, get_table_default};

fn main() {
    // Direct curve evaluation
    println!("=== CIE 1931 Curve ===");
    for l_star in [0.0, 0.08, 0.25, 0.5, 0.75, 1.0] {
        println!("L* {:.2} -> luminance {:.6}", l_star, cie1931_f64(l_star));
    }

    // 8-bit input onto an 8-bit PWM counter
    println!("\n=== 8-bit Table ===");
    let table = get_table_default(255).expect("valid parameters");
    for i in [0usize, 64, 128, 192, 255] {
        println!("input {:3} -> duty {:3}", i, table.lookup(i));
    }
    println!("compact storage: {}", table.is_compact());

    // 16-bit timer with 100 brightness steps
    println!("\n=== 16-bit Timer, 100 Steps ===");
    let table = get_table(65535, 100).expect("valid parameters");
    for i in [0usize, 10, 25, 50, 75, 100] {
        println!("step {:3} -> duty {:5}", i, table.lookup(i));
    }

    // A dedicated cache with its own lifetime
    println!("\n=== Owned Cache ===");
    let cache = TableCache::new();
    cache.get_table(42, 255).expect("valid parameters");
    cache.get_table(42, 15).expect("valid parameters");
    println!("cached tables: {}", cache.len());
    cache.clear();
    println!("after clear: {}", cache.len());

    // Invalid parameters are rejected without touching the cache
    match cache.get_table(0, 255) {
        Ok(_) => unreachable!(),
        Err(err) => println!("rejected: {}", err),
    }
}
