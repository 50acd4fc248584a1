//! # Example 01: Payroll Run
//!
//! A full salary stream lifecycle:
//! 1. Register FHE keys for both participants
//! 2. Create an encrypted stream (1000 units over 1000 seconds)
//! 3. Withdraw as accrual progresses
//! 4. Pause, observe the withdrawal block, resume
//! 5. Settle after expiry
//!
//! Run with: `cargo run -p paystream-demos --example 01_payroll_run`

use paystream_core::{EncryptionGateway, PublicKey};
use paystream_demos::{participant, DemoGateway};
use paystream_engine::{EngineConfig, StreamEngine};
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Example 01: Payroll Run ===\n");

    let owner = participant(1);
    let employer = participant(2);
    let employee = participant(3);

    let gateway = Arc::new(DemoGateway::new());
    let engine = StreamEngine::new(EngineConfig::new(owner).with_gateway(gateway.clone()));

    // Key registration comes first, as the orchestration layer requires
    engine.register_key(employer.clone(), PublicKey::new("0xem-pl-oy-er"), 0);
    engine.register_key(employee.clone(), PublicKey::new("0xem-pl-oy-ee"), 0);

    let start = 1_000_000;
    let id = engine
        .create_stream_encrypted(employer.clone(), employee.clone(), 1000, 1000, start)
        .expect("stream creation");
    println!("Created stream {id} for {}\n", employee.short());

    for offset in [250u64, 500, 600] {
        let now = start + offset;
        println!(
            "t+{offset}: earned {}, available {}, progress {}%",
            engine.earned(id, now).unwrap(),
            engine.available(id, now).unwrap(),
            engine.progress_percent(id, now).unwrap(),
        );
    }

    let paid = engine.request_withdrawal(id, &employee, start + 500).unwrap();
    println!("\nEmployee withdrew {paid} at t+500");

    engine.pause_stream(id, &employer, start + 500).unwrap();
    match engine.request_withdrawal(id, &employee, start + 600) {
        Err(err) => println!("Withdrawal while paused: {err}"),
        Ok(_) => unreachable!("paused streams reject withdrawals"),
    }

    engine.resume_stream(id, &employer, start + 600).unwrap();
    let paid = engine.request_withdrawal(id, &employee, start + 600).unwrap();
    println!("After resume, employee withdrew {paid} at t+600");

    // Encrypted view for the employer's dashboard
    let handle = engine
        .encrypted_earned_amount(id, &employer, start + 600)
        .unwrap();
    println!(
        "Encrypted earned handle {handle} decrypts to {}",
        gateway.decrypt(&handle).unwrap()
    );

    // Final settlement at the end of the stream
    let paid = engine.request_withdrawal(id, &employee, start + 1000).unwrap();
    let stream = engine.get_stream(id).unwrap();
    println!(
        "\nSettled {paid} at expiry; total withdrawn {} of {}, status {}",
        stream.total_withdrawn,
        stream.total_amount,
        engine.status(id, start + 1000).unwrap(),
    );
}
