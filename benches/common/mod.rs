#![allow(dead_code)]

use clmm_liquidity_math::math::fixed_point::{price_to_sqrt_price_x96, sqrt_price_x96_to_price};
use clmm_liquidity_math::math::liquidity_math::{
    amounts_for_liquidity, liquidity_from_amounts, reserves_for_position,
};
use clmm_liquidity_math::math::tick_math::{
    align_to_spacing, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, price_to_tick,
    tick_to_sqrt_price_x96,
};
use clmm_liquidity_math::math::units::to_e18;
use clmm_liquidity_math::math::FeeTier;
use clmm_liquidity_math::pool::targeting::amount_to_reach_target;
use clmm_liquidity_math::pool::{PoolState, Position, TickRange};
use clmm_liquidity_math::{Address, U256};
use criterion::Criterion;
use std::hint::black_box;

const TICKS: [i32; 6] = [-887272, -85380, -1, 0, 60, 738203];
const LIQUIDITY: u128 = 13949318807175567298654;

fn usdc_weth_pool() -> PoolState {
    PoolState::from_price(FeeTier::Low, 1.0 / 5000.0, LIQUIDITY).unwrap()
}

pub fn bench_tick_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_math");

    group.bench_function("get_sqrt_ratio_at_tick", |b| {
        b.iter(|| {
            for tick in TICKS {
                black_box(get_sqrt_ratio_at_tick(black_box(tick)).unwrap());
            }
        })
    });

    let ratios: Vec<U256> = TICKS
        .iter()
        .map(|&tick| get_sqrt_ratio_at_tick(tick).unwrap())
        .collect();
    group.bench_function("get_tick_at_sqrt_ratio", |b| {
        b.iter(|| {
            for ratio in &ratios {
                black_box(get_tick_at_sqrt_ratio(black_box(*ratio)).unwrap());
            }
        })
    });

    group.bench_function("tick_to_sqrt_price_x96", |b| {
        b.iter(|| {
            for tick in TICKS {
                black_box(tick_to_sqrt_price_x96(black_box(tick)).unwrap());
            }
        })
    });

    group.bench_function("price_to_tick_aligned", |b| {
        b.iter(|| align_to_spacing(price_to_tick(black_box(1.0 / 4900.0)).unwrap(), 10).unwrap())
    });

    group.finish();
}

pub fn bench_fixed_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point");

    group.bench_function("price_to_sqrt_price_x96", |b| {
        b.iter(|| price_to_sqrt_price_x96(black_box(0.0002)).unwrap())
    });

    let sqrt = price_to_sqrt_price_x96(5000.0).unwrap();
    group.bench_function("sqrt_price_x96_to_price", |b| {
        b.iter(|| sqrt_price_x96_to_price(black_box(sqrt)))
    });

    group.finish();
}

pub fn bench_liquidity_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("liquidity_math");

    let pool = usdc_weth_pool();
    let sqrt_lower = get_sqrt_ratio_at_tick(-85380).unwrap();
    let sqrt_upper = get_sqrt_ratio_at_tick(-84980).unwrap();
    let amount0 = to_e18(10_000.0).unwrap();
    let amount1 = to_e18(2.0).unwrap();

    group.bench_function("liquidity_from_amounts", |b| {
        b.iter(|| {
            liquidity_from_amounts(
                black_box(pool.sqrt_price_x96()),
                sqrt_lower,
                sqrt_upper,
                black_box(amount0),
                black_box(amount1),
            )
            .unwrap()
        })
    });

    group.bench_function("amounts_for_liquidity", |b| {
        b.iter(|| {
            amounts_for_liquidity(
                black_box(pool.sqrt_price_x96()),
                sqrt_lower,
                sqrt_upper,
                black_box(LIQUIDITY),
            )
            .unwrap()
        })
    });

    group.bench_function("reserves_for_position", |b| {
        b.iter(|| {
            reserves_for_position(
                black_box(LIQUIDITY),
                1.0 / 5100.0,
                1.0 / 4900.0,
                black_box(0.0002),
            )
            .unwrap()
        })
    });

    group.finish();
}

pub fn bench_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("position");

    let pool = usdc_weth_pool();
    let range = TickRange::from_prices(1.0 / 4900.0, 1.0 / 5100.0, pool.fee_tier).unwrap();
    let amount0 = to_e18(10_000.0).unwrap();
    let amount1 = to_e18(2.0).unwrap();

    group.bench_function("open", |b| {
        b.iter(|| {
            Position::open(Address::ZERO, range, &pool, black_box(amount0), black_box(amount1))
                .unwrap()
        })
    });

    let position = Position::open(Address::ZERO, range, &pool, amount0, amount1)
        .unwrap()
        .position;
    group.bench_function("decrease", |b| {
        b.iter(|| position.decrease(&pool, black_box(0.5)).unwrap())
    });

    group.finish();
}

pub fn bench_targeting(c: &mut Criterion) {
    let current = price_to_sqrt_price_x96(5000.0).unwrap();
    let target = price_to_sqrt_price_x96(5100.0).unwrap();

    c.bench_function("amount_to_reach_target", |b| {
        b.iter(|| {
            amount_to_reach_target(black_box(LIQUIDITY), black_box(current), black_box(target))
                .unwrap()
        })
    });
}
