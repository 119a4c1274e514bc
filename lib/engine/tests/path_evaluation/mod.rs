mod algebra;
mod limits;
mod scenarios;
mod test_utils;
mod unbounded;
