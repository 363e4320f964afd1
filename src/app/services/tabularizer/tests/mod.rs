mod tabulate_tests;
mod time_tests;
