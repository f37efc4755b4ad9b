use rungs_core::{AlwaysPromote, Config, NeverPromote, SkipList};
use std::collections::BTreeMap;

fn print_layer_profile(list: &SkipList<u32>, name: &str) {
    println!("=== {} ===", name);
    println!("Total elements: {}, layers: {}", list.len(), list.height());

    let layers = list.layers();
    for (depth, layer) in layers.iter().enumerate() {
        let level = layers.len() - 1 - depth;
        let share = layer.len() as f64 / list.len().max(1) as f64 * 100.0;
        println!("  Level {:2}: {:6} nodes ({:6.2}%)", level, layer.len(), share);
    }
    println!();
}

fn demonstrate_height_distribution(p: f64) -> rungs_core::Result<()> {
    println!("=== Height Distribution (p = {}) ===\n", p);

    let mut heights = BTreeMap::new();
    for seed in 0..200 {
        let mut list = SkipList::with_config(&Config::new(p).with_seed(seed))?;
        list.extend(0..500u32);
        *heights.entry(list.height()).or_insert(0) += 1;
    }

    println!("Layer count over 200 lists of 500 elements:");
    for (height, count) in heights {
        println!("  {:2} layers: {:4} {}", height, count, "#".repeat(count / 4));
    }
    println!();
    Ok(())
}

fn main() -> rungs_core::Result<()> {
    println!("=== SkipList Visualization Example ===\n");

    demonstrate_height_distribution(0.5)?;
    demonstrate_height_distribution(0.25)?;

    let mut list = SkipList::with_config(&Config::new(0.5).with_seed(7))?;
    list.extend(0..10_000u32);
    print_layer_profile(&list, "Random coin, p = 0.5");

    println!("=== Operation Visualization ===\n");

    let mut demo = SkipList::with_config(&Config::default().with_seed(3))?;
    println!("Inserting: 5, 2, 8, 1, 9, 3");
    for val in [5, 2, 8, 1, 9, 3] {
        demo.insert(val);
        println!("After inserting {}:\n{}\n", val, demo);
    }

    println!("Removing: 1, 8");
    for val in [1, 8] {
        demo.remove(&val);
        println!("After removing {}:\n{}\n", val, demo);
    }

    println!("=== Degenerate Coins ===\n");

    let mut flat = SkipList::with_coin(NeverPromote);
    flat.extend([4, 1, 3, 2]);
    println!("Never promote:\n{}\n", flat);

    let mut tower = SkipList::with_coin(AlwaysPromote).with_max_promotions(3);
    tower.extend([4, 1, 3, 2]);
    println!("Always promote, capped at 3:\n{}", tower);

    Ok(())
}
