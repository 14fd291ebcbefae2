#[cfg(test)]
pub mod common;




#[cfg(test)]
mod test_outs;


#[cfg(test)]
mod test_team_switch;
