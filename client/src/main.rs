fn main() {
    balloon_buddy::app::bootstrap::run_client_app();
}
