// Headless three-reel spin: start rolling, stop the reels left to right,
// then run a drop presentation on the same machine. No renderer — slot
// state is printed after each sequence.

use reel_engine::{
    DropConfig, DropType, Easing, ReelBank, ReelConfig, ReelFeatures, ReelProfile, SpinContext,
    StripData, SymbolConfig, SymbolId, DEFAULT_TICK_DT,
};

fn strip_for(reel: usize) -> StripData {
    // One shared band, landing on a different offset per reel.
    let strip = [3, 1, 4, 1, 5, 9, 2, 6].map(SymbolId).to_vec();
    let rng = (reel * 2 + 1) % strip.len();
    let window = |row: isize| {
        let len = strip.len() as isize;
        strip[((rng as isize + row).rem_euclid(len)) as usize]
    };
    // Ring rows: one hidden buffer row on each side of the three visible.
    let current: Vec<SymbolId> = (-2..=2).map(window).collect();
    StripData {
        strip,
        current_strip: current.clone(),
        current_pay_strip: vec![0, 10, 5, 25, 0],
        current_symbol_index_strip: current,
        rng,
    }
}

fn print_windows(bank: &ReelBank) {
    for row in 0..3 {
        let line: Vec<String> = bank
            .iter()
            .map(|reel| format!("{:>2}", reel.visible_symbols()[row].0))
            .collect();
        println!("  {}", line.join(" | "));
    }
}

fn main() {
    env_logger::init();

    let profile = ReelProfile {
        features: ReelFeatures {
            drop_rolling: true,
            ..ReelFeatures::default()
        },
        ..ReelProfile::default()
    };

    let mut bank = ReelBank::new();
    for i in 0..3 {
        let mut reel = reel_engine::Reel::new(profile.clone());
        let config = ReelConfig {
            reel_index: i,
            ..ReelConfig::default()
        };
        reel.configure(config, SymbolConfig::default())
            .expect("reel geometry");
        reel.set_strip_data(strip_for(i));
        bank.add(reel);
    }

    let ctx = SpinContext::new();

    println!("spinning...");
    for reel in bank.iter_mut() {
        reel.start_rolling(&ctx, Easing::Smooth).expect("rolling");
    }
    for _ in 0..120 {
        bank.advance_all(DEFAULT_TICK_DT, &ctx);
    }

    // Stop left to right, half a second apart.
    let mut completions = Vec::new();
    for i in 0..bank.len() {
        let completion = bank
            .get_mut(i)
            .expect("reel index")
            .spin_stop(false)
            .expect("stop plan");
        completions.push(completion);
        for _ in 0..30 {
            bank.advance_all(DEFAULT_TICK_DT, &ctx);
        }
    }
    while !completions.iter().all(|c| c.is_complete()) {
        bank.advance_all(DEFAULT_TICK_DT, &ctx);
    }

    println!("settled after spin:");
    print_windows(&bank);
    log::info!("spin events: {:?}", bank.drain_events());

    // Same result shown as a drop cascade.
    println!("dropping...");
    let mut completions = Vec::new();
    for reel in bank.iter_mut() {
        reel.reset();
        let completion = reel
            .start_drop(DropConfig {
                drop_type: DropType::OutIn,
                stagger_in: true,
                stagger_out: true,
                ..DropConfig::default()
            })
            .expect("drop config");
        completions.push(completion);
    }
    while !completions.iter().all(|c| c.is_complete()) {
        bank.advance_all(DEFAULT_TICK_DT, &ctx);
    }

    println!("settled after drop:");
    print_windows(&bank);
    log::info!("drop events: {:?}", bank.drain_events());
}
