#![no_main]

use libfuzzer_sys::fuzz_target;
use miwear::analyzer::{AppIdAnalyzer, ScreenStateAnalyzer};
use miwear::matcher::{AppCreationMatcher, LineMatcher, ScreenStateMatcher};

fuzz_target!(|data: &[u8]| {
    // Single lines go through the matchers directly
    let line = String::from_utf8_lossy(data);
    let _ = AppCreationMatcher.match_line(&line);
    let _ = ScreenStateMatcher.match_line(&line);

    // Whole inputs go through the analyzers, invalid UTF-8 included
    let mut appid = AppIdAnalyzer::default();
    if appid.analyze_reader(data).is_ok() {
        let _ = appid.summarize();
    }
    let mut screen = ScreenStateAnalyzer::default();
    if screen.analyze_reader(data).is_ok() {
        let _ = screen.summarize();
    }
});
