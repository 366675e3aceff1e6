//! User agent generation

use rand::seq::SliceRandom;

const OS_STRINGS: [&str; 4] = [
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
];

const FIREFOX_VERSIONS: [&str; 3] = ["123.0", "124.0", "125.0"];

const CHROME_VERSIONS: [&str; 3] = ["122.0.0.0", "123.0.0.0", "124.0.0.0"];

/// Generate a random desktop browser user agent
pub fn generate_user_agent() -> String {
    let mut rng = rand::thread_rng();
    let os = OS_STRINGS.choose(&mut rng).copied().unwrap_or(OS_STRINGS[0]);

    if rand::random::<bool>() {
        let chrome = CHROME_VERSIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or(CHROME_VERSIONS[0]);
        format!(
            "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
            os, chrome
        )
    } else {
        let firefox = FIREFOX_VERSIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or(FIREFOX_VERSIONS[0]);
        format!(
            "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
            os, firefox, firefox
        )
    }
}

/// Accept header for the HTML and XML pages providers serve
pub fn accept_html() -> &'static str {
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
}
