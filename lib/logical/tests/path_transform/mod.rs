mod lowering;
mod temporaries;
mod test_utils;
