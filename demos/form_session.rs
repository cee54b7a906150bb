//! # Example: form_session
//!
//! Drives a parameter model the way an edit form does: step buttons, a yes/no
//! toggle, a typed-in value, then a save.
//!
//! Shows how to:
//! - Build a [`ParamSet`] with step and precision per numeric field.
//! - Attach the built-in [`LogWriter`] and a view subscriber.
//! - Surface the save outcome.
//!
//! ## Flow
//! ```text
//! step_up / set ──► Model ──► "edit"   ──► view: "<title>: <display> [modified]"
//! save          ──► Model ──► "status" ──► view: status line
//!                     └─► POST $PARAMSYNC_BASE_URL/update
//! ```
//!
//! ## Run
//! ```bash
//! PARAMSYNC_BASE_URL=http://localhost:4433/ RUST_LOG=info cargo run --example form_session
//! ```

use std::rc::{Rc, Weak};

use paramsync::{
    Emission, LogWriter, Model, ModelConfig, Notification, Observable, ParamSet, Subscriber,
};
use tracing_subscriber::EnvFilter;

fn fridge_params() -> ParamSet {
    ParamSet::new()
        .numeric("fridge_setpoint", 18.0, 0.1, 1)
        .numeric("fridge_difference", 0.2, 0.1, 1)
        .numeric("fridge_range_lower", 3.0, 1.0, 0)
        .numeric("fridge_range_upper", 3.0, 1.0, 0)
        .numeric("overshoot_factor", 0.1, 0.1, 1)
        .boolean("running", false)
        .boolean("nowort", false)
}

fn view(model: &Rc<Model>) -> Subscriber<Notification> {
    let model: Weak<Model> = Rc::downgrade(model);
    Subscriber::new(move |e: &Emission<'_, Notification>| {
        let Some(model) = model.upgrade() else {
            return;
        };
        match e.payload() {
            Notification::Edit { name, .. } => {
                let shown = model.display(name).unwrap_or_default();
                let marker = if model.is_modified(name).unwrap_or(false) {
                    " [modified]"
                } else {
                    ""
                };
                println!("{name}: {shown}{marker}");
            }
            Notification::Status(status) => println!("status: {status}"),
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::var("PARAMSYNC_BASE_URL") {
        Ok(base) => ModelConfig::with_base_url(base),
        Err(_) => ModelConfig::default(),
    };

    let model = Rc::new(
        Model::builder(fridge_params())
            .with_token("csrfblah")
            .with_config(config)
            .build()?,
    );

    if let Some(notice) = model.permission_notice() {
        println!("status: {notice}");
    }

    let _log = LogWriter::new().attach(model.as_ref());
    let view = view(&model);
    model.on("edit", &view).on("status", &view);

    model.step_up("fridge_setpoint")?;
    model.step_up("fridge_setpoint")?;
    model.step_down("fridge_range_lower")?;
    model.set("running", true)?;
    model.set("fridge_difference", 0.3)?;

    let outcome = model.save().await;
    println!("done: {outcome}");
    Ok(())
}
