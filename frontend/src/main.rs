fn main() {
    sunlight_frontend::run();
}
