//! Basic facade usage example
//!
//! Demonstrates driver registration, context propagation and builder chaining.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_facade::prelude::*;
use rust_logger_facade::{infof, warnf};

fn handle_request(ctx: &Context) {
    // Handlers only see the context, never the concrete backend
    let log = from_context(ctx).with_context(ctx);
    log.info("handling request");
    infof!(log, "user {} opened {} documents", ctx.user_id(), 3);
}

fn main() -> Result<()> {
    println!("=== Rust Logger Facade - Basic Usage Example ===\n");

    let registry = DriverRegistry::with_builtin_drivers();
    println!("Registered drivers: {:?}\n", registry.drivers());

    println!("1. Text output at debug level:");
    let logger = registry.create(
        WRITER_DRIVER,
        Config::new(Output::stdout())
            .level(Level::Debug)
            .time_layout("%H:%M:%S"),
    )?;
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    warnf!(logger, "Disk usage at {}%", 91);

    println!("\n2. Branching loggers with fields:");
    let db = logger.with_field("component", "db".into());
    let http = logger.with_field("component", "http".into());
    db.info("connected");
    http.info("listening");
    logger.info("root logger is unchanged");

    println!("\n3. Request context in JSON:");
    let json = registry.create(
        WRITER_DRIVER,
        Config::new(Output::stdout()).extra("format", "json"),
    )?;
    let ctx = Context::new()
        .with_logger(json)
        .with_request_id("req-42")
        .with_user_id("alice");
    handle_request(&ctx);

    println!("\n4. Unknown driver and missing logger:");
    if let Err(e) = registry.create("zap", Config::new(Output::stdout())) {
        println!("   {}", e);
    }
    from_context(&Context::new()).error("silently discarded by the null logger");

    logger.sync()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
