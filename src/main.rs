use dreamscape_ai::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
