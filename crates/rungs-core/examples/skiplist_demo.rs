use rungs_core::{Config, SkipList};

fn main() -> rungs_core::Result<()> {
    println!("SkipList Demo\n");

    let config = Config::default().with_seed(2024).with_max_promotions(6);
    let mut list = SkipList::with_config(&config)?;
    println!("Created empty skip list");
    println!("Length: {}, Empty: {}\n", list.len(), list.is_empty());

    println!("Inserting elements...");
    for i in [5, 2, 8, 1, 9, 3, 7, 4, 6] {
        list.insert(i);
        println!("  Inserted {}", i);
    }
    println!("Length after inserts: {}, layers: {}\n", list.len(), list.height());

    println!("Membership:");
    for i in [1, 5, 9, 10] {
        println!("  contains({}) = {}", i, list.contains(&i));
    }
    println!();

    println!("Positional access:");
    for i in [0, 4, 8, 9] {
        match list.at(i) {
            Ok(v) => println!("  at({}) = {}", i, v),
            Err(e) => println!("  at({}) failed: {}", i, e),
        }
    }
    println!();

    println!("Range [3, 7):");
    for value in list.range(&3, &7) {
        println!("  {}", value);
    }
    println!();

    println!("Inserting a duplicate (5) and a new minimum (0)...");
    list.insert(5);
    list.insert(0);
    println!("  first = {:?}, length = {}\n", list.first(), list.len());

    println!("Removing elements:");
    for i in [0, 5, 8, 42] {
        println!("  remove({}) -> {}", i, list.remove(&i));
    }
    println!();

    list.check_integrity()?;
    println!("Final list contents: {:?}", list.values());
    Ok(())
}
