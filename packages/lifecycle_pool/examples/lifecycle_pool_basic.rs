//! Demonstrates the lifecycle hooks of `ObjectPool` and what happens when the pool overflows.

use lifecycle_pool::{Error, ObjectPool};

#[derive(Debug)]
struct Bullet {
    serial: u32,
    visible: bool,
}

fn main() -> Result<(), Error> {
    let mut next_serial = 0;

    let mut pool = ObjectPool::builder(move || {
        next_serial += 1;
        println!("create #{next_serial}");
        Box::new(Bullet {
            serial: next_serial,
            visible: false,
        })
    })
    .on_get(|bullet| {
        bullet.visible = true;
        println!("get #{}", bullet.serial);
    })
    .on_release(|bullet| {
        bullet.visible = false;
        println!("release #{}", bullet.serial);
    })
    .on_destroy(|bullet| println!("destroy #{}", bullet.serial))
    .default_capacity(2)
    .max_size(2)
    .build()?;

    pool.prewarm(2)?;

    // Three bullets in flight: two come from the pool, one is created on demand.
    let bullets: Vec<_> = (0..3).map(|_| pool.get()).collect();

    // Only two fit back into the pool, the third is destroyed.
    for bullet in bullets {
        pool.release(bullet)?;
    }

    println!(
        "idle: {}, active: {}",
        pool.count_inactive(),
        pool.count_active()
    );

    Ok(())
}
