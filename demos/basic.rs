//! This example demonstrates a component that only renders again when the
//! inputs it declares as dependencies change.

use depmemo::{wrap, Content, Deps, Element, Input, Props, RenderDeps, Renderer};

#[derive(Props)]
struct Profile {
    name: String,
    age: u32,
    children: Content,
}

fn main() {
    let memo = wrap(profile, Deps::on(["name"]), None, false);
    let mut renderer = Renderer::new();

    // [Render] Mounting always renders.
    let id = renderer.mount(memo, input("John", 25, "Bio"));

    // [Skip] The age is not a dependency.
    report(renderer.update(id, input("John", 30, "Bio")));

    // [Skip] Children are rebuilt on every parent render and never count.
    report(renderer.update(id, input("John", 30, "Another bio")));

    // [Render] The name changed.
    report(renderer.update(id, input("Jane", 30, "Bio")));

    // [Render] The parent forced a render through the render deps.
    let forced = input("Jane", 30, "Bio").with_render_deps(RenderDeps::Off);
    report(renderer.update(id, forced));

    if let Some(output) = renderer.output(id) {
        println!("{output}");
    }
}

/// Render a profile.
fn profile(props: &Profile) -> String {
    format!("{} ({})", props.name, props.age)
}

fn input(name: &str, age: u32, bio: &str) -> Input<Profile> {
    let children = Element::new("p").child(bio).into();
    Input::new(Profile { name: name.into(), age, children })
}

fn report(update: depmemo::Result<depmemo::Update>) {
    match update {
        Ok(update) => println!("{update:?}"),
        Err(err) => eprintln!("{err}"),
    }
}
