use parlance_application::ParlanceServices;

pub fn detect(services: &ParlanceServices, text: &str) {
    println!("{}", services.detector().detect_code(text));
}
