use shadow_rs::ShadowBuilder;

fn main() {
    // Version metadata for `flatauth --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
