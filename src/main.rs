#[rocket::launch]
fn launch() -> _ {
    userforge_api::rocket()
}
