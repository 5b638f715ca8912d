//! Module inheritance walkthrough
//!
//! This demo shows:
//! - Extending a module with another module's behaviors
//! - Overriding an inherited behavior and calling the ancestor's version
//! - Driving the same thing through a script context

use cim_capability::{
    call_ancestor, extend, CapabilityResult, Module, ScriptContext, Value,
};

fn main_module() -> Module {
    Module::builder()
        .behavior("doSomething", |_, _| Ok(Value::from("Foo")))
        .behavior("doSomethingImpressive", |_, _| Ok(Value::from("Yes")))
        .build()
}

fn main() -> CapabilityResult<()> {
    println!("=== CIM Capability Inheritance Demo ===\n");

    let main = main_module();
    let sub = Module::new();
    extend(&sub, &main)?;

    println!("SubModule members: {:?}", sub.member_names()?);
    println!("SubModule.doSomething() = {}", sub.call("doSomething", &[])?);

    sub.define_behavior("doSomething", |this, _| {
        let base = call_ancestor(this, "doSomething", &[])?;
        Ok(Value::from(format!("{}Bar, {}", base, this.get("name")?)))
    })?;

    println!("\n=== After override ===");
    println!("SubModule.doSomething() = {}", sub.call("doSomething", &[])?);
    println!(
        "SubModule.doSomethingImpressive() = {}",
        sub.call("doSomethingImpressive", &[])?
    );

    sub.set("name", "SubModule")?;
    println!("With a name set: {}", sub.call("doSomething", &[])?);

    println!("\n=== Script context ===");
    let context = ScriptContext::new();
    context.set_property("MainModule", main_module())?;
    context.set_property("SubModule", Module::new())?;
    context.extend_named("SubModule", "MainModule")?;
    println!(
        "SubModule.doSomethingImpressive() = {}",
        context.call_function_in_suite("doSomethingImpressive", "SubModule", &[], None)?
    );
    println!(
        "p(3, 4) = {}",
        context.call_function("p", &[Value::from(3), Value::from(4)])?
    );

    match context.extend_named("Nobody", "MainModule") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Extending an unbound name fails: {}", e),
    }

    Ok(())
}
