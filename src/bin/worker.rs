use hr_animations::worker_agent::FrameTask;
use yew_agent::Registrable;

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    hr_animations::logging::init(log::LevelFilter::Info);
    FrameTask::registrar().register();
}
