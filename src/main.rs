use tannen::prelude::*;

fn main() -> Result<(), SceneError> {
    env_logger::init();

    let scene = Scene::new(SceneConfig::default());
    Viewer::new(scene).with_title("Tannen").run()
}
